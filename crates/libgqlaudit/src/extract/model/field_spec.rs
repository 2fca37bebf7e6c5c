use crate::extract::model::Constraint;
use crate::extract::model::DeclaredType;
use crate::loc::SourceLocation;
use serde::Deserialize;
use serde::Serialize;

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub name: String,
    pub declared_type: DeclaredType,

    /// No default is present and the outermost type is not `Optional`.
    pub required: bool,

    pub constraints: Vec<Constraint>,
    pub has_default: bool,

    /// The default is the literal `None`, either assigned directly or passed
    /// as `Field(default=None)`.
    pub default_is_none: bool,

    pub location: SourceLocation,
}
