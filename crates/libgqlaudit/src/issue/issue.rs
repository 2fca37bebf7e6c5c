use crate::issue::IssueCode;
use crate::issue::Severity;
use crate::loc::SourceLocation;
use serde::Deserialize;
use serde::Serialize;

/// A single typed finding. Issues are immutable once created.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    pub code: IssueCode,
    pub severity: Severity,
    pub message: String,
    pub location: SourceLocation,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}
impl Issue {
    /// Creates an issue with the code's default severity and suggestion.
    pub fn new(
        code: IssueCode,
        message: impl Into<String>,
        location: SourceLocation,
    ) -> Self {
        Self {
            code,
            severity: code.default_severity(),
            message: message.into(),
            location,
            suggestion: code.default_suggestion().map(str::to_string),
        }
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}
impl std::fmt::Display for Issue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} {}: {}",
            self.location,
            self.severity,
            self.code,
            self.message,
        )
    }
}
