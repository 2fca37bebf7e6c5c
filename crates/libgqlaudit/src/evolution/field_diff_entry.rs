use crate::evolution::FieldStatus;
use crate::schema::FieldKey;
use serde::Deserialize;
use serde::Serialize;

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct FieldDiffEntry {
    pub type_name: String,
    pub field_name: String,
    pub status: FieldStatus,

    /// The deprecation reason, for `DEPRECATED` entries and for `REMOVED`
    /// entries whose field had been deprecated before it went away.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}
impl FieldDiffEntry {
    pub fn new(
        type_name: impl Into<String>,
        field_name: impl Into<String>,
        status: FieldStatus,
        reason: Option<String>,
    ) -> Self {
        Self {
            type_name: type_name.into(),
            field_name: field_name.into(),
            status,
            reason,
        }
    }

    pub fn key(&self) -> FieldKey {
        FieldKey::new(self.type_name.as_str(), self.field_name.as_str())
    }

    pub(super) fn sort_key(&self) -> (&str, &str) {
        (self.type_name.as_str(), self.field_name.as_str())
    }
}
