use serde::Deserialize;
use serde::Serialize;

/// One argument accepted by a [`SchemaField`](crate::schema::SchemaField).
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct SchemaArgument {
    pub name: String,

    /// The argument's type in SDL notation, e.g. `OrderInput!`.
    pub type_ref: String,
}
impl SchemaArgument {
    pub fn new(name: impl Into<String>, type_ref: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_ref: type_ref.into(),
        }
    }

    pub fn named_type(&self) -> &str {
        strip_type_wrappers(&self.type_ref)
    }
}

/// Removes list and non-null wrappers from an SDL type reference.
pub(crate) fn strip_type_wrappers(type_ref: &str) -> &str {
    type_ref.trim_matches(|c: char| {
        c == '[' || c == ']' || c == '!' || c.is_whitespace()
    })
}
