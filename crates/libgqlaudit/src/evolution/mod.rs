//! Comparison of two schema snapshots, and of extracted operations against
//! that comparison.

mod diff_engine;
mod evolution_summary;
mod field_diff_entry;
mod field_status;
mod schema_diff;
mod usage_checker;

pub use diff_engine::diff_snapshots;
pub use evolution_summary::EvolutionSummary;
pub use field_diff_entry::FieldDiffEntry;
pub use field_status::FieldStatus;
pub use schema_diff::SchemaDiff;
pub use usage_checker::UsageChecker;
pub use usage_checker::check_operation_usage;
