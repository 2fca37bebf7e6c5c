use crate::issue::Issue;
use crate::issue::IssueCode;
use crate::issue::Severity;
use indexmap::IndexMap;
use serde::Deserialize;
use serde::Serialize;

/// Accumulates [`Issue`]s from every validation pass.
///
/// The collector is append-only: issues are kept in insertion order and are
/// never reordered or mutated.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IssueCollector {
    issues: Vec<Issue>,
}
impl IssueCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, issue: Issue) {
        log::trace!("Collected issue: {issue}");
        self.issues.push(issue);
    }

    pub fn extend(&mut self, issues: impl IntoIterator<Item = Issue>) {
        for issue in issues {
            self.push(issue);
        }
    }

    pub fn issues(&self) -> &[Issue] {
        self.issues.as_slice()
    }

    pub fn into_issues(self) -> Vec<Issue> {
        self.issues
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn len(&self) -> usize {
        self.issues.len()
    }

    /// Number of issues per code, in order of each code's first appearance.
    pub fn count_by_code(&self) -> IndexMap<IssueCode, usize> {
        let mut counts = IndexMap::new();
        for issue in &self.issues {
            *counts.entry(issue.code).or_insert(0) += 1;
        }
        counts
    }

    pub fn count_by_severity(&self) -> IndexMap<Severity, usize> {
        let mut counts = IndexMap::new();
        for issue in &self.issues {
            *counts.entry(issue.severity).or_insert(0) += 1;
        }
        counts
    }

    pub fn max_severity(&self) -> Option<Severity> {
        self.issues.iter().map(|issue| issue.severity).max()
    }

    /// Whether any collected issue is at least as severe as `threshold`.
    pub fn has_at_least(&self, threshold: Severity) -> bool {
        self.max_severity().is_some_and(|max| max >= threshold)
    }
}
impl FromIterator<Issue> for IssueCollector {
    fn from_iter<T: IntoIterator<Item = Issue>>(iter: T) -> Self {
        let mut collector = Self::new();
        collector.extend(iter);
        collector
    }
}
