use crate::Cli;
use crate::CommandResult;
use crate::RunnableCommand;
use crate::commands::audit_inputs::ScanArgs;
use crate::config::AuditToml;
use crate::output_utils;
use crate::output_utils::OutputFormat;
use libgqlaudit::audit::AuditConfig;
use libgqlaudit::audit::Auditor;

#[derive(Debug, clap::Args)]
pub(crate) struct ValidateCmd {
    #[arg(
        help="Do not flag subscription operations.",
        long,
    )]
    allow_subscriptions: bool,

    #[command(flatten)]
    scan: ScanArgs,
}
impl ValidateCmd {
    fn execute(&self, cli: &Cli) -> anyhow::Result<CommandResult> {
        let config = AuditToml::load(cli.config.as_deref())?;
        let mut rules = config.surface.clone();
        if self.allow_subscriptions {
            rules = rules.allow_subscriptions(true);
        }

        let scanned = self.scan.extract(&config)?;
        let report = Auditor::new(AuditConfig::surface_only().with_rules(rules))
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
impl RunnableCommand for ValidateCmd {
    pub async fn run(self, cli: Cli) -> CommandResult {
        self.execute(&cli).unwrap_or_else(CommandResult::from)
    }
}
