//! The audit pipeline: parallel extraction, then surface validation and
//! schema-evolution checks, merged into one ordered issue sequence.

mod audit_config;
mod audit_error;
mod audit_report;
mod auditor;
mod extract_files;

pub use audit_config::AuditConfig;
pub use audit_error::AuditError;
pub use audit_report::AuditReport;
pub use auditor::Auditor;
pub use extract_files::extract_files;

type Result<T> = std::result::Result<T, AuditError>;

#[cfg(test)]
mod tests;
