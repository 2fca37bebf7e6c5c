use std::process::ExitCode;

/// How a command finished. Maps onto the process exit code.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum CommandStatus {
    /// Nothing at or above the failure threshold was found.
    Success,
    /// The run completed but reported findings at or above the threshold.
    Findings,
    /// The run could not complete: bad input files, a missing snapshot, an
    /// unreadable config.
    Fatal,
}
impl CommandStatus {
    pub fn exit_code(&self) -> ExitCode {
        match self {
            Self::Success => ExitCode::SUCCESS,
            Self::Findings => ExitCode::from(1),
            Self::Fatal => ExitCode::from(2),
        }
    }
}

#[derive(Debug)]
pub(crate) struct CommandResult {
    pub status: CommandStatus,
    pub stderr: Option<String>,
    pub stdout: Option<String>,
}

impl CommandResult {
    pub fn fatal(fmt_args: std::fmt::Arguments<'_>) -> Self {
        Self {
            status: CommandStatus::Fatal,
            stderr: Some(format!("{fmt_args}")),
            stdout: None,
        }
    }

    pub fn success(stdout: String) -> Self {
        Self {
            status: CommandStatus::Success,
            stderr: None,
            stdout: Some(stdout),
        }
    }

    /// A completed run whose exit status depends on whether it found
    /// anything worth failing on.
    pub fn report(stdout: String, failed: bool) -> Self {
        Self {
            status: if failed { CommandStatus::Findings } else { CommandStatus::Success },
            stderr: None,
            stdout: Some(stdout),
        }
    }

    pub fn exit_code(&self) -> ExitCode {
        self.status.exit_code()
    }
}

impl From<anyhow::Error> for CommandResult {
    fn from(err: anyhow::Error) -> Self {
        Self::fatal(format_args!("{} {err:#}", crate::output_utils::RED_X))
    }
}
