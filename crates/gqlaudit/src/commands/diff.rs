use crate::Cli;
use crate::CommandResult;
use crate::RunnableCommand;
use crate::commands::audit_inputs::SnapshotArgs;
use crate::config::AuditToml;
use crate::config::FailOn;
use crate::output_utils;
use crate::output_utils::OutputFormat;
use libgqlaudit::audit::AuditConfig;
use libgqlaudit::audit::Auditor;
use libgqlaudit::evolution::EvolutionSummary;
use libgqlaudit::evolution::SchemaDiff;
use libgqlaudit::issue::Issue;
use serde::Serialize;

#[derive(Debug, clap::Args)]
pub(crate) struct DiffCmd {
    #[arg(
        help="Least severe change that makes the run exit with status 1.",
        long,
        value_enum,
    )]
    fail_on: Option<FailOn>,

    #[command(flatten)]
    snapshots: SnapshotArgs,
}

#[derive(Serialize)]
struct DiffOutput<'a> {
    diff: &'a SchemaDiff,
    summary: &'a EvolutionSummary,
    issues: &'a [Issue],
}

impl DiffCmd {
    fn execute(&self, cli: &Cli) -> anyhow::Result<CommandResult> {
        let config = AuditToml::load(cli.config.as_deref())?;
        let snapshots = self.snapshots.load()?;

        // A comparison with no source files leaves only the schema changes.
        let audit_config = AuditConfig::default()
            .with_surface(false)
            .with_schema_evolution(true)
            .with_schema_changes(true);
        let report = snapshots.attach(Auditor::new(audit_config)).run(&[])?;
        let (Some(diff), Some(summary)) = (&report.diff, &report.summary) else {
            anyhow::bail!("Schema comparison produced no result");
        };

        let fail_on = self.fail_on.unwrap_or(config.report.fail_on);
        let failed = fail_on.is_failure(report.issues.max_severity());
        let stdout = match cli.format {
            OutputFormat::Json => output_utils::to_json(&DiffOutput {
                diff,
                summary,
                issues: report.issues(),
            })?,
            OutputFormat::Text => {
                let mut output = output_utils::render_evolution_summary(
                    &diff.old_version,
                    &diff.new_version,
                    summary,
                );
                let issues = output_utils::render_issues(report.issues());
                if !issues.is_empty() {
                    output.push_str("\n\n");
                    output.push_str(issues.trim_end());
                }
                output
            },
        };
        Ok(CommandResult::report(stdout, failed))
    }
}

#[inherent::inherent]
impl RunnableCommand for DiffCmd {
    pub async fn run(self, cli: Cli) -> CommandResult {
        self.execute(&cli).unwrap_or_else(CommandResult::from)
    }
}
