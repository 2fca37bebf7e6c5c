use serde::Deserialize;
use serde::Serialize;

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum SchemaTypeKind {
    Enum,
    Input,
    Interface,
    Object,
    Scalar,
    Union,
}
impl SchemaTypeKind {
    /// Maps an introspection `__TypeKind` name. Wrapper kinds (`LIST`,
    /// `NON_NULL`) never name a type and yield `None`.
    pub fn from_introspection(kind: &str) -> Option<Self> {
        Some(match kind {
            "ENUM" => Self::Enum,
            "INPUT_OBJECT" => Self::Input,
            "INTERFACE" => Self::Interface,
            "OBJECT" => Self::Object,
            "SCALAR" => Self::Scalar,
            "UNION" => Self::Union,
            _ => return None,
        })
    }

    /// Whether fields of this kind can be selected through in an operation.
    pub fn has_selectable_fields(&self) -> bool {
        matches!(self, Self::Interface | Self::Object)
    }
}
impl std::fmt::Display for SchemaTypeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Enum => "enum",
            Self::Input => "input",
            Self::Interface => "interface",
            Self::Object => "object",
            Self::Scalar => "scalar",
            Self::Union => "union",
        })
    }
}
