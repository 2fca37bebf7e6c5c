use crate::evolution::EvolutionSummary;
use crate::evolution::FieldDiffEntry;
use crate::evolution::FieldStatus;
use crate::issue::Issue;
use crate::issue::IssueCode;
use crate::loc::SourceLocation;
use serde::Deserialize;
use serde::Serialize;

/// The full comparison of an old and a new schema snapshot.
///
/// Type name lists are sorted; `entries` are sorted by type name, then field
/// name, and hold at most one entry per `(type, field)` pair. Field entries
/// under added, removed or replaced types are not recorded: the type-level
/// change covers them.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct SchemaDiff {
    pub old_version: String,
    pub new_version: String,
    pub added_types: Vec<String>,
    pub removed_types: Vec<String>,

    /// Types present in both snapshots whose kind changed (e.g. an object
    /// that became an interface).
    pub replaced_types: Vec<String>,

    pub entries: Vec<FieldDiffEntry>,
}
impl SchemaDiff {
    /// Whether the two snapshots describe the same fields and types. A
    /// snapshot diffed against itself is always empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
            && self.added_types.is_empty()
            && self.removed_types.is_empty()
            && self.replaced_types.is_empty()
    }

    pub fn entry(&self, type_name: &str, field_name: &str) -> Option<&FieldDiffEntry> {
        self.entries
            .binary_search_by(|entry| entry.sort_key().cmp(&(type_name, field_name)))
            .ok()
            .map(|idx| &self.entries[idx])
    }

    pub fn entries_with_status(
        &self,
        status: FieldStatus,
    ) -> impl Iterator<Item = &FieldDiffEntry> {
        self.entries.iter().filter(move |entry| entry.status == status)
    }

    /// Whether a type of the old snapshot is gone from the new one, either
    /// removed outright or replaced by a type of another kind.
    pub fn is_type_gone(&self, type_name: &str) -> bool {
        let find = |names: &[String]| {
            names.binary_search_by(|name| name.as_str().cmp(type_name)).is_ok()
        };
        find(&self.removed_types) || find(&self.replaced_types)
    }

    pub fn summary(&self) -> EvolutionSummary {
        EvolutionSummary {
            added_fields: self.entries_with_status(FieldStatus::Added).count(),
            deprecated_fields: self.entries_with_status(FieldStatus::Deprecated).count(),
            removed_fields: self.entries_with_status(FieldStatus::Removed).count(),
            added_types: self.added_types.len(),
            removed_types: self.removed_types.len(),
            replaced_types: self.replaced_types.len(),
        }
    }

    /// Aggregate schema-comparison issues, attached to the new snapshot's
    /// schema-level location.
    ///
    /// This is the only place where additions are reported: an operation
    /// written against the old snapshot cannot use a field that did not
    /// exist yet.
    pub fn to_issues(&self) -> Vec<Issue> {
        let location = SourceLocation::for_schema(&self.new_version);
        let mut issues = vec![];

        for type_name in &self.removed_types {
            issues.push(Issue::new(
                IssueCode::TypeRemoved,
                format!("Type `{type_name}` was removed in schema {}", self.new_version),
                location.clone(),
            ));
        }
        for type_name in &self.replaced_types {
            issues.push(Issue::new(
                IssueCode::TypeRemoved,
                format!(
                    "Type `{type_name}` was replaced by a type of a different kind in schema {}",
                    self.new_version,
                ),
                location.clone(),
            ));
        }
        for type_name in &self.added_types {
            issues.push(Issue::new(
                IssueCode::TypeAdded,
                format!("Type `{type_name}` was added in schema {}", self.new_version),
                location.clone(),
            ));
        }

        for entry in &self.entries {
            let message = match (entry.status, &entry.reason) {
                (FieldStatus::Added, _) => format!(
                    "Field `{}` was added in schema {}",
                    entry.key(),
                    self.new_version,
                ),
                (FieldStatus::Deprecated, Some(reason)) => format!(
                    "Field `{}` is deprecated in schema {}: {reason}",
                    entry.key(),
                    self.new_version,
                ),
                (FieldStatus::Deprecated, None) => format!(
                    "Field `{}` is deprecated in schema {}",
                    entry.key(),
                    self.new_version,
                ),
                (FieldStatus::Removed, _) => format!(
                    "Field `{}` was removed in schema {}",
                    entry.key(),
                    self.new_version,
                ),
            };
            let mut issue = Issue::new(entry.status.issue_code(), message, location.clone());
            if entry.status == FieldStatus::Deprecated
                && let Some(reason) = &entry.reason {
                issue = issue.with_suggestion(reason.as_str());
            }
            issues.push(issue);
        }

        issues
    }
}
