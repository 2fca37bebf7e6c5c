use crate::issue::IssueCode;
use serde::Deserialize;
use serde::Serialize;

/// How a schema field changed between two snapshots.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FieldStatus {
    Added,
    /// Present in both snapshots and deprecated only in the newer one.
    Deprecated,
    Removed,
}
impl FieldStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Added => "ADDED",
            Self::Deprecated => "DEPRECATED",
            Self::Removed => "REMOVED",
        }
    }

    pub fn issue_code(&self) -> IssueCode {
        match self {
            Self::Added => IssueCode::FieldAdded,
            Self::Deprecated => IssueCode::FieldDeprecated,
            Self::Removed => IssueCode::FieldRemoved,
        }
    }
}
impl std::fmt::Display for FieldStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
