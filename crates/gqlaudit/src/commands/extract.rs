use crate::Cli;
use crate::CommandResult;
use crate::RunnableCommand;
use crate::commands::audit_inputs::ScanArgs;
use crate::config::AuditToml;
use crate::output_utils;
use crate::output_utils::OutputFormat;
use libgqlaudit::extract::BlockKind;
use libgqlaudit::extract::FileExtraction;
use libgqlaudit::extract::operation::OperationKind;
use libgqlaudit::issue::IssueCollector;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, clap::Args)]
pub(crate) struct ExtractCmd {
    #[command(flatten)]
    scan: ScanArgs,
}

#[derive(Debug, Default, Serialize)]
struct BlockCounts {
    queries: usize,
    mutations: usize,
    subscriptions: usize,
    fragments: usize,
    models: usize,
}
impl BlockCounts {
    fn tally(extractions: &[FileExtraction]) -> Self {
        let mut counts = Self::default();
        for block in extractions.iter().flat_map(|extraction| &extraction.blocks) {
            match block.kind() {
                BlockKind::Fragment => counts.fragments += 1,
                BlockKind::Model => counts.models += 1,
                BlockKind::Operation => match block.as_operation().map(|op| op.kind) {
                    Some(OperationKind::Query) => counts.queries += 1,
                    Some(OperationKind::Mutation) => counts.mutations += 1,
                    Some(OperationKind::Subscription) => counts.subscriptions += 1,
                    None => (),
                },
            }
        }
        counts
    }

    fn total(&self) -> usize {
        self.queries + self.mutations + self.subscriptions + self.fragments + self.models
    }
}

#[derive(Serialize)]
struct ExtractOutput<'a> {
    counts: &'a BlockCounts,
    files: &'a [FileExtraction],
    unreadable: &'a [PathBuf],
}

impl ExtractCmd {
    fn execute(&self, cli: &Cli) -> anyhow::Result<CommandResult> {
        let config = AuditToml::load(cli.config.as_deref())?;
        let scanned = self.scan.extract(&config)?;
        let extractions = &scanned.extractions;

        let counts = BlockCounts::tally(extractions);
        let issues: IssueCollector = extractions.iter()
            .flat_map(|extraction| extraction.issues.iter().cloned())
            .collect();
        let failed = self.scan.fail_on(&config).is_failure(issues.max_severity());

        let stdout = match cli.format {
            OutputFormat::Json => output_utils::to_json(&ExtractOutput {
                counts: &counts,
                files: extractions,
                unreadable: &scanned.unreadable,
            })?,
            OutputFormat::Text => {
                let mut output = format!(
                    concat!(
                        "{} Extracted {} blocks from {} files:\n",
                        "  * Queries: {}\n",
                        "  * Mutations: {}\n",
                        "  * Subscriptions: {}\n",
                        "  * Fragments: {}\n",
                        "  * Models: {}\n",
                        "  * Skipped {} files with other extensions.\n",
                        "  * Skipped {} unreadable files.",
                    ),
                    if issues.is_empty() { output_utils::GREEN_CHECK } else { output_utils::WARNING_SIGN },
                    counts.total(),
                    extractions.len(),
                    counts.queries,
                    counts.mutations,
                    counts.subscriptions,
                    counts.fragments,
                    counts.models,
                    scanned.num_skipped,
                    scanned.unreadable.len(),
                );
                if !issues.is_empty() {
                    output.push_str("\n\n");
                    output.push_str(output_utils::render_issues(issues.issues()).trim_end());
                }
                output
            },
        };
        Ok(CommandResult::report(stdout, failed))
    }
}

#[inherent::inherent]
impl RunnableCommand for ExtractCmd {
    pub async fn run(self, cli: Cli) -> CommandResult {
        self.execute(&cli).unwrap_or_else(CommandResult::from)
    }
}
