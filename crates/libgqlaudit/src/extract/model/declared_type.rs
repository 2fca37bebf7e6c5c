use serde::Deserialize;
use serde::Serialize;

/// A field's declared type, resolved into a small structural taxonomy.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum DeclaredType {
    /// Literal values, kept as source text.
    Literal(Vec<String>),
    List(Box<DeclaredType>),
    Mapping(Box<DeclaredType>, Box<DeclaredType>),
    /// A reference to another (model) class.
    Model(String),
    Optional(Box<DeclaredType>),
    Scalar(String),
    Union(Vec<DeclaredType>),
}

/// Broad families of scalar types, used to judge constraint compatibility.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ScalarClass {
    Boolean,
    Bytes,
    Decimal,
    Number,
    String,
    Temporal,
    /// `Any`, `object` and names the auditor cannot classify.
    Unknown,
}

const STRING_SCALARS: &[&str] = &[
    "AnyHttpUrl", "AnyUrl", "EmailStr", "FilePath", "HttpUrl", "IPvAnyAddress",
    "Json", "NameEmail", "SecretStr", "str", "constr",
];
const NUMBER_SCALARS: &[&str] = &[
    "NegativeFloat", "NegativeInt", "NonNegativeFloat", "NonNegativeInt",
    "NonPositiveFloat", "NonPositiveInt", "PositiveFloat", "PositiveInt",
    "StrictFloat", "StrictInt", "complex", "confloat", "conint", "float", "int",
];
const TEMPORAL_SCALARS: &[&str] = &[
    "AwareDatetime", "FutureDate", "FutureDatetime", "NaiveDatetime",
    "PastDate", "PastDatetime", "condate", "date", "datetime", "time",
    "timedelta",
];
const OTHER_SCALARS: &[&str] = &[
    "Any", "None", "NoneType", "UUID", "UUID1", "UUID4", "object", "type",
];

impl DeclaredType {
    /// Classifies a bare (non-generic) type name as a scalar or a model
    /// reference.
    pub fn from_name(name: &str) -> Self {
        let short = name.rsplit('.').next().unwrap_or(name);
        if Self::is_scalar_name(short) {
            Self::Scalar(short.to_string())
        } else {
            Self::Model(short.to_string())
        }
    }

    fn is_scalar_name(name: &str) -> bool {
        name == "bool"
            || name == "StrictBool"
            || name == "bytes"
            || name == "SecretBytes"
            || name == "conbytes"
            || name == "Decimal"
            || name == "condecimal"
            || STRING_SCALARS.contains(&name)
            || NUMBER_SCALARS.contains(&name)
            || TEMPORAL_SCALARS.contains(&name)
            || OTHER_SCALARS.contains(&name)
            // Lower-case names are builtins or aliases, never model classes.
            || name.starts_with(|c: char| c.is_ascii_lowercase())
    }

    pub fn is_optional(&self) -> bool {
        matches!(self, Self::Optional(_))
    }

    /// Strips every outer `Optional` wrapper.
    pub fn unwrap_optional(&self) -> &DeclaredType {
        match self {
            Self::Optional(inner) => inner.unwrap_optional(),
            other => other,
        }
    }

    /// Calls `visit` on this type and every nested type, outermost first.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a DeclaredType)) {
        visit(self);
        match self {
            Self::List(inner) | Self::Optional(inner) => inner.walk(visit),
            Self::Mapping(key, value) => {
                key.walk(visit);
                value.walk(visit);
            },
            Self::Union(members) => {
                for member in members {
                    member.walk(visit);
                }
            },
            Self::Literal(_) | Self::Model(_) | Self::Scalar(_) => (),
        }
    }
}
impl std::fmt::Display for DeclaredType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Literal(values) => write!(f, "Literal[{}]", values.join(", ")),
            Self::List(inner) => write!(f, "List[{inner}]"),
            Self::Mapping(key, value) => write!(f, "Dict[{key}, {value}]"),
            Self::Model(name) | Self::Scalar(name) => f.write_str(name),
            Self::Optional(inner) => write!(f, "Optional[{inner}]"),
            Self::Union(members) => {
                f.write_str("Union[")?;
                for (idx, member) in members.iter().enumerate() {
                    if idx > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{member}")?;
                }
                f.write_str("]")
            },
        }
    }
}

pub fn scalar_class(name: &str) -> ScalarClass {
    match name {
        "bool" | "StrictBool" => ScalarClass::Boolean,
        "bytes" | "SecretBytes" | "conbytes" => ScalarClass::Bytes,
        "Decimal" | "condecimal" => ScalarClass::Decimal,
        _ if STRING_SCALARS.contains(&name) => ScalarClass::String,
        _ if NUMBER_SCALARS.contains(&name) => ScalarClass::Number,
        _ if TEMPORAL_SCALARS.contains(&name) => ScalarClass::Temporal,
        _ => ScalarClass::Unknown,
    }
}
