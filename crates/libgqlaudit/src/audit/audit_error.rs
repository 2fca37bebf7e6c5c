use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq)]
pub enum AuditError {
    /// Schema-evolution checks were requested but a snapshot to compare was
    /// not supplied. This is the only run-level fatal condition: every other
    /// problem is reported as an issue.
    #[error("Schema evolution checks need both snapshots, but the {which} snapshot is missing")]
    MissingSnapshot {
        which: String,
    },
}
