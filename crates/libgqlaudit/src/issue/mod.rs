mod issue;
mod issue_code;
mod issue_collector;
mod severity;

pub use issue::Issue;
pub use issue_code::IssueCode;
pub use issue_collector::IssueCollector;
pub use severity::Severity;
