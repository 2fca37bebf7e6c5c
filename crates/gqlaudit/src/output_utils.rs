use libgqlaudit::evolution::EvolutionSummary;
use libgqlaudit::issue::Issue;
use libgqlaudit::issue::IssueCollector;
use serde::Serialize;
use std::fmt::Write;

pub(crate) const GREEN_CHECK: &str = "✅";
pub(crate) const RED_X: &str = "❌";
pub(crate) const WARNING_SIGN: &str = "⚠️";

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, clap::ValueEnum)]
pub(crate) enum OutputFormat {
    #[default]
    Text,
    Json,
}

pub(crate) fn to_json<T: Serialize>(value: &T) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// One line per issue (`file:line:col severity CODE: message`), each
/// followed by its suggestion when it has one.
pub(crate) fn render_issues(issues: &[Issue]) -> String {
    let mut output = String::new();
    for issue in issues {
        let _ = writeln!(output, "{issue}");
        if let Some(suggestion) = &issue.suggestion {
            let _ = writeln!(output, "    suggestion: {suggestion}");
        }
    }
    output
}

/// Issue counts by code, then by severity.
pub(crate) fn render_issue_summary(issues: &IssueCollector) -> String {
    if issues.is_empty() {
        return format!("{GREEN_CHECK} No issues found.");
    }

    let marker = if issues.has_at_least(libgqlaudit::issue::Severity::Error) {
        RED_X
    } else {
        WARNING_SIGN
    };
    let mut output = format!("{marker} Found {} issues:\n", issues.len());
    for (code, count) in issues.count_by_code() {
        let _ = writeln!(output, "  * {code}: {count}");
    }
    let by_severity = issues.count_by_severity()
        .into_iter()
        .map(|(severity, count)| format!("{count} {severity}"))
        .collect::<Vec<_>>()
        .join(", ");
    let _ = write!(output, "  ({by_severity})");
    output
}

pub(crate) fn render_evolution_summary(old: &str, new: &str, summary: &EvolutionSummary) -> String {
    format!(
        concat!(
            "Schema changes from `{}` to `{}`:\n",
            "  * Types added: {}\n",
            "  * Types removed: {}\n",
            "  * Types replaced: {}\n",
            "  * Fields added: {}\n",
            "  * Fields deprecated: {}\n",
            "  * Fields removed: {}",
        ),
        old,
        new,
        summary.added_types,
        summary.removed_types,
        summary.replaced_types,
        summary.added_fields,
        summary.deprecated_fields,
        summary.removed_fields,
    )
}

/// Text rendering of a full audit: the schema comparison when there is one,
/// every issue, then the issue summary.
pub(crate) fn render_report(report: &libgqlaudit::audit::AuditReport) -> String {
    let mut sections = vec![];
    if let (Some(diff), Some(summary)) = (&report.diff, &report.summary) {
        sections.push(render_evolution_summary(&diff.old_version, &diff.new_version, summary));
    }
    let issues = render_issues(report.issues());
    if !issues.is_empty() {
        sections.push(issues.trim_end().to_string());
    }
    let mut audited = format!(
        "Audited {} blocks in {} files.",
        report.blocks_checked,
        report.files_scanned,
    );
    if !report.files_unreadable.is_empty() {
        audited.push_str(&format!(
            " {} Skipped {} unreadable files:",
            WARNING_SIGN,
            report.files_unreadable.len(),
        ));
        for path in &report.files_unreadable {
            audited.push_str(&format!("\n  * {}", path.display()));
        }
    }
    sections.push(audited);
    sections.push(render_issue_summary(&report.issues));
    sections.join("\n\n")
}
