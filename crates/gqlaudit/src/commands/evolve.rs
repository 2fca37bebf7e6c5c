use crate::Cli;
use crate::CommandResult;
use crate::RunnableCommand;
use crate::commands::audit_inputs::ScanArgs;
use crate::commands::audit_inputs::SnapshotArgs;
use crate::config::AuditToml;
use crate::output_utils;
use crate::output_utils::OutputFormat;
use libgqlaudit::audit::AuditConfig;
use libgqlaudit::audit::Auditor;

#[derive(Debug, clap::Args)]
pub(crate) struct EvolveCmd {
    #[arg(help="Do not flag subscription operations.", long)]
    allow_subscriptions: bool,

    #[arg(help="Only run schema-evolution checks.", long)]
    no_surface: bool,

    #[arg(
        help="Also report every type and field change between the two \
             schemas, ahead of per-file issues.",
        long,
    )]
    schema_changes: bool,

    #[command(flatten)]
    scan: ScanArgs,

    #[command(flatten)]
    snapshots: SnapshotArgs,
}
impl EvolveCmd {
    fn execute(&self, cli: &Cli) -> anyhow::Result<CommandResult> {
        let config = AuditToml::load(cli.config.as_deref())?;
        let mut rules = config.surface.clone();
        if self.allow_subscriptions {
            rules = rules.allow_subscriptions(true);
        }
        let audit_config = AuditConfig::default()
            .with_rules(rules)
            .with_surface(!self.no_surface)
            .with_schema_evolution(true)
            .with_schema_changes(self.schema_changes);

        let snapshots = self.snapshots.load()?;
        let scanned = self.scan.extract(&config)?;
        let report = snapshots.attach(Auditor::new(audit_config))
            .run(&scanned.extractions)?
            .with_unreadable_files(scanned.unreadable);

        let failed = self.scan.fail_on(&config).is_failure(report.issues.max_severity());
        let stdout = match cli.format {
            OutputFormat::Json => output_utils::to_json(&report)?,
            OutputFormat::Text => output_utils::render_report(&report),
        };
        Ok(CommandResult::report(stdout, failed))
    }
}

#[inherent::inherent]
impl RunnableCommand for EvolveCmd {
    pub async fn run(self, cli: Cli) -> CommandResult {
        self.execute(&cli).unwrap_or_else(CommandResult::from)
    }
}
