use crate::schema::SchemaField;
use crate::schema::SchemaTypeKind;
use indexmap::IndexMap;
use serde::Deserialize;
use serde::Serialize;

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct SchemaType {
    pub name: String,
    pub kind: SchemaTypeKind,
    pub(super) fields: IndexMap<String, SchemaField>,
}
impl SchemaType {
    pub fn new(name: impl Into<String>, kind: SchemaTypeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            fields: IndexMap::new(),
        }
    }

    /// Adds `field`, keeping the first definition when the name is taken.
    /// Returns `false` if the field was a duplicate.
    pub fn add_field(&mut self, field: SchemaField) -> bool {
        if self.fields.contains_key(&field.name) {
            log::warn!(
                "Ignoring duplicate definition of field `{}.{}`.",
                self.name,
                field.name,
            );
            return false;
        }
        self.fields.insert(field.name.to_string(), field);
        true
    }

    pub fn field(&self, name: &str) -> Option<&SchemaField> {
        self.fields.get(name)
    }

    pub fn fields(&self) -> &IndexMap<String, SchemaField> {
        &self.fields
    }
}
