use crate::schema::SchemaArgument;
use crate::schema::strip_type_wrappers;
use serde::Deserialize;
use serde::Serialize;

/// One field (or input field) of a [`SchemaType`](crate::schema::SchemaType).
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct SchemaField {
    pub name: String,

    /// The field's type in SDL notation, e.g. `[Order!]!`.
    pub type_ref: String,

    pub nullable: bool,
    pub deprecated: bool,
    pub deprecation_reason: Option<String>,

    /// Declared arguments, in schema order. Always empty for input fields.
    pub arguments: Vec<SchemaArgument>,
}
impl SchemaField {
    /// Creates a non-deprecated field. Nullability is read off `type_ref`.
    pub fn new(name: impl Into<String>, type_ref: impl Into<String>) -> Self {
        let type_ref = type_ref.into();
        Self {
            name: name.into(),
            nullable: !type_ref.trim_end().ends_with('!'),
            type_ref,
            deprecated: false,
            deprecation_reason: None,
            arguments: vec![],
        }
    }

    pub fn argument(&self, name: &str) -> Option<&SchemaArgument> {
        self.arguments.iter().find(|argument| argument.name == name)
    }

    pub fn deprecated(mut self, reason: Option<&str>) -> Self {
        self.deprecated = true;
        self.deprecation_reason = reason.map(str::to_string);
        self
    }

    /// The innermost named type, with list and non-null wrappers removed.
    pub fn named_type(&self) -> &str {
        strip_type_wrappers(&self.type_ref)
    }

    pub fn is_list(&self) -> bool {
        self.type_ref.trim_start().starts_with('[')
    }
}
