use serde::Deserialize;
use serde::Serialize;

/// A `name: value` argument. The value is kept as its source text.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Argument {
    pub name: String,
    pub value: String,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum Selection {
    Field(FieldSelection),
    FragmentSpread(FragmentSpread),
    InlineFragment(InlineFragment),
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct FieldSelection {
    pub alias: Option<String>,
    pub name: String,
    pub arguments: Vec<Argument>,
    pub directives: Vec<String>,

    /// `None` when the field has no braces at all; `Some(vec![])` for an
    /// explicit `{}`.
    pub selection_set: Option<Vec<Selection>>,
}
impl FieldSelection {
    /// The name under which the field appears in a response.
    pub fn response_key(&self) -> &str {
        self.alias.as_deref().unwrap_or(self.name.as_str())
    }

    pub fn has_selection_set(&self) -> bool {
        self.selection_set.is_some()
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct FragmentSpread {
    pub name: String,
    pub directives: Vec<String>,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct InlineFragment {
    pub type_condition: Option<String>,
    pub directives: Vec<String>,
    pub selection_set: Vec<Selection>,
}

/// Whether `name` stands in for an interpolated host-language expression
/// rather than a name written in the source.
pub(crate) fn is_placeholder_name(name: &str) -> bool {
    name.len() >= 2 && name.bytes().all(|b| b == b'_')
}
