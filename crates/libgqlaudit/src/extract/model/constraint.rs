use serde::Deserialize;
use serde::Serialize;

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum ConstraintCategory {
    Decimal,
    Length,
    NumericBound,
    Pattern,
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstraintKind {
    DecimalPlaces,
    Ge,
    Gt,
    Le,
    Lt,
    MaxDigits,
    MaxLength,
    MinLength,
    MultipleOf,
    Pattern,
}
impl ConstraintKind {
    /// Maps a keyword argument of `Field(...)` or a `con*()` helper.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Some(match keyword {
            "decimal_places" => Self::DecimalPlaces,
            "ge" => Self::Ge,
            "gt" => Self::Gt,
            "le" => Self::Le,
            "lt" => Self::Lt,
            "max_digits" => Self::MaxDigits,
            "max_length" | "max_items" => Self::MaxLength,
            "min_length" | "min_items" => Self::MinLength,
            "multiple_of" => Self::MultipleOf,
            "pattern" | "regex" => Self::Pattern,
            _ => return None,
        })
    }

    pub fn category(&self) -> ConstraintCategory {
        match self {
            Self::DecimalPlaces | Self::MaxDigits => ConstraintCategory::Decimal,
            Self::MaxLength | Self::MinLength => ConstraintCategory::Length,
            Self::Ge | Self::Gt | Self::Le | Self::Lt | Self::MultipleOf =>
                ConstraintCategory::NumericBound,
            Self::Pattern => ConstraintCategory::Pattern,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DecimalPlaces => "decimal_places",
            Self::Ge => "ge",
            Self::Gt => "gt",
            Self::Le => "le",
            Self::Lt => "lt",
            Self::MaxDigits => "max_digits",
            Self::MaxLength => "max_length",
            Self::MinLength => "min_length",
            Self::MultipleOf => "multiple_of",
            Self::Pattern => "pattern",
        }
    }
}

/// One declared validation constraint, with its value kept as source text.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Constraint {
    pub kind: ConstraintKind,
    pub value: String,
}
impl Constraint {
    pub fn new(kind: ConstraintKind, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }

    /// The value as a number, when it is a plain numeric literal (including
    /// `Decimal("...")` and underscores as digit separators).
    pub fn numeric_value(&self) -> Option<f64> {
        let mut text = self.value.trim();
        if let Some(inner) = text.strip_prefix("Decimal(").and_then(|t| t.strip_suffix(')')) {
            text = inner.trim().trim_matches(|c| c == '"' || c == '\'');
        }
        text.replace('_', "").parse::<f64>().ok()
    }
}
impl std::fmt::Display for Constraint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}={}", self.kind.as_str(), self.value)
    }
}
