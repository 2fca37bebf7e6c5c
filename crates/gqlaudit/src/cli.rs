use clap::CommandFactory;
use crate::CommandResult;
use crate::commands;
use crate::output_utils::OutputFormat;
use std::path::PathBuf;

#[derive(clap::Parser, Debug)]
#[command(
    name = "gqlaudit",
    version,
    about = "Audits GraphQL operations and data models embedded in a codebase.",
)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) cmd: Option<commands::CommandEnum>,

    #[arg(
        global=true,
        help="Path to a gqlaudit.toml config file. Defaults to `gqlaudit.toml` \
             in the working directory when one exists.",
        long,
    )]
    pub config: Option<PathBuf>,

    #[arg(
        default_value_t=OutputFormat::Text,
        global=true,
        help="Output format for reports.",
        long,
        value_enum,
    )]
    pub format: OutputFormat,

    #[arg(
        global=true,
        help="Enable verbose output.",
        long,
        short='v',
    )]
    pub verbose: bool,
}
impl Cli {
    pub(crate) async fn run_default(self) -> CommandResult {
        CommandResult::success(Self::command().render_help().to_string())
    }
}
