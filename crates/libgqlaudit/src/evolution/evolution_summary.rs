use serde::Deserialize;
use serde::Serialize;

/// Aggregate counts of a [`SchemaDiff`](crate::evolution::SchemaDiff).
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct EvolutionSummary {
    pub added_fields: usize,
    pub deprecated_fields: usize,
    pub removed_fields: usize,
    pub added_types: usize,
    pub removed_types: usize,
    pub replaced_types: usize,
}
impl EvolutionSummary {
    pub fn total_changes(&self) -> usize {
        self.added_fields
            + self.deprecated_fields
            + self.removed_fields
            + self.added_types
            + self.removed_types
            + self.replaced_types
    }

    /// Whether any change can break an existing operation.
    pub fn has_breaking_changes(&self) -> bool {
        self.removed_fields > 0 || self.removed_types > 0 || self.replaced_types > 0
    }
}
impl std::fmt::Display for EvolutionSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} fields added, {} deprecated, {} removed; {} types added, {} removed, {} replaced",
            self.added_fields,
            self.deprecated_fields,
            self.removed_fields,
            self.added_types,
            self.removed_types,
            self.replaced_types,
        )
    }
}
