use crate::extract::model::FieldSpec;
use serde::Deserialize;
use serde::Serialize;

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum ModelKind {
    /// Inherits (possibly indirectly) from a `BaseModel`-style base class.
    BaseModel,
    /// Marked by a `dataclass` decorator.
    Dataclass,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ModelDefinition {
    pub name: String,
    pub model_kind: ModelKind,
    pub bases: Vec<String>,
    pub fields: Vec<FieldSpec>,
}
impl ModelDefinition {
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|field| field.name == name)
    }
}
