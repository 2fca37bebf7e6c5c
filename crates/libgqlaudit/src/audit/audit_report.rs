use crate::evolution::EvolutionSummary;
use crate::evolution::SchemaDiff;
use crate::issue::Issue;
use crate::issue::IssueCollector;
use crate::issue::Severity;
use serde::Deserialize;
use serde::Serialize;
use std::path::PathBuf;

/// The outcome of one audit run: every issue in a stable order, plus the
/// schema comparison when evolution checks ran.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AuditReport {
    pub issues: IssueCollector,
    pub files_scanned: usize,
    pub blocks_checked: usize,

    /// Files that were discovered but could not be read as text, so never
    /// reached extraction. Recorded by the caller that read the sources.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub files_unreadable: Vec<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diff: Option<SchemaDiff>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<EvolutionSummary>,
}
impl AuditReport {
    pub fn issues(&self) -> &[Issue] {
        self.issues.issues()
    }

    pub fn with_unreadable_files(mut self, files: Vec<PathBuf>) -> Self {
        self.files_unreadable = files;
        self
    }

    /// Whether the run found anything at least as severe as `threshold`.
    pub fn fails_at(&self, threshold: Severity) -> bool {
        self.issues.has_at_least(threshold)
    }
}
