use std::{fmt, process::Command};

use crate::{command::StageCommand, error::PipelineError};

/// Exit status of an external command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageStatus {
    code: Option<i32>,
}

impl StageStatus {
    /// A successful exit.
    pub const SUCCESS: StageStatus = StageStatus { code: Some(0) };

    /// A status with the given exit code.
    pub fn from_code(code: i32) -> Self {
        Self { code: Some(code) }
    }

    /// A process that ended without an exit code, e.g. killed by a signal.
    pub fn terminated() -> Self {
        Self { code: None }
    }

    /// The exit code, if the process exited normally.
    pub fn code(&self) -> Option<i32> {
        self.code
    }

    /// Whether the command exited with code 0.
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

impl From<std::process::ExitStatus> for StageStatus {
    fn from(status: std::process::ExitStatus) -> Self {
        Self {
            code: status.code(),
        }
    }
}

impl fmt::Display for StageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code {
            Some(code) => write!(f, "exit code {code}"),
            None => write!(f, "termination by signal"),
        }
    }
}

/// Runs external commands on behalf of the pipeline.
///
/// Implementations block until the command has finished.
pub trait StageExecutor {
    /// Run `command` to completion and return its exit status.
    ///
    /// An error is returned only when the command could not be run at all.
    fn run(&mut self, command: &StageCommand) -> Result<StageStatus, PipelineError>;
}

/// Executes commands as child processes that inherit the terminal.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessExecutor;

impl StageExecutor for ProcessExecutor {
    fn run(&mut self, command: &StageCommand) -> Result<StageStatus, PipelineError> {
        log::debug!("running `{}`", command);

        let status = Command::new(command.program())
            .args(command.args())
            .status()
            .map_err(|source| PipelineError::Spawn {
                program: command.program().display().to_string(),
                source,
            })?;

        Ok(status.into())
    }
}

#[cfg(test)]
mod tests {
    use super::{ProcessExecutor, StageExecutor, StageStatus};
    use crate::{command::StageCommand, error::PipelineError};

    #[test]
    fn status_display() {
        assert_eq!(StageStatus::from_code(3).to_string(), "exit code 3");
        assert_eq!(
            StageStatus::terminated().to_string(),
            "termination by signal"
        );
        assert!(StageStatus::SUCCESS.success());
        assert!(!StageStatus::terminated().success());
    }

    #[test]
    fn spawn_missing_program() {
        let command = StageCommand::new("robo3dgs-this-program-does-not-exist");
        let res = ProcessExecutor.run(&command);
        assert!(matches!(res, Err(PipelineError::Spawn { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn exit_codes_are_forwarded() -> Result<(), PipelineError> {
        let ok = StageCommand::new("sh").arg("-c").arg("exit 0");
        assert_eq!(ProcessExecutor.run(&ok)?, StageStatus::SUCCESS);

        let failed = StageCommand::new("sh").arg("-c").arg("exit 7");
        assert_eq!(ProcessExecutor.run(&failed)?, StageStatus::from_code(7));
        Ok(())
    }
}
