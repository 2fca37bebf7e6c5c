use crate::Cli;
use crate::CommandResult;

/// A subcommand. Commands never print: everything they want shown is
/// carried back in the [`CommandResult`].
pub(crate) trait RunnableCommand: std::fmt::Debug {
    async fn run(self, cli: Cli) -> CommandResult;
}
