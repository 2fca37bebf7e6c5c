mod audit_inputs;
mod diff;
mod evolve;
mod extract;
mod validate;

use crate::Cli;
use crate::CommandResult;
use diff::DiffCmd;
use evolve::EvolveCmd;
use extract::ExtractCmd;
use validate::ValidateCmd;

#[derive(Debug, clap::Parser)]
#[command(name = "gqlaudit")]
pub(crate) enum CommandEnum {
    /// Compare two schema snapshots without looking at any source files.
    Diff(Box<DiffCmd>),

    /// Check operations against a schema change, plus surface validation.
    Evolve(Box<EvolveCmd>),

    /// List the GraphQL operations, fragments and data models found in
    /// source files.
    Extract(Box<ExtractCmd>),

    /// Run schema-independent validation over operations and models.
    Validate(Box<ValidateCmd>),
}
impl CommandEnum {
    pub(crate) async fn run(self, cli: Cli) -> CommandResult {
        match self {
            Self::Diff(cmd) => cmd.run(cli).await,
            Self::Evolve(cmd) => cmd.run(cli).await,
            Self::Extract(cmd) => cmd.run(cli).await,
            Self::Validate(cmd) => cmd.run(cli).await,
        }
    }
}
