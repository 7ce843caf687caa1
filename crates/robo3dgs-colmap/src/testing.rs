use std::collections::VecDeque;

use crate::{
    command::StageCommand,
    error::PipelineError,
    executor::{StageExecutor, StageStatus},
};

type Hook = Box<dyn FnMut(&StageCommand)>;

/// A [`StageExecutor`] that records every command instead of running it.
///
/// Statuses are served from a script in call order; once the script is exhausted
/// every call succeeds.
///
/// ```
/// use robo3dgs_colmap::testing::RecordingExecutor;
/// use robo3dgs_colmap::{StageCommand, StageExecutor, StageStatus};
///
/// let mut executor = RecordingExecutor::new().then(StageStatus::from_code(1));
/// let status = executor.run(&StageCommand::new("colmap")).unwrap();
/// assert!(!status.success());
/// assert_eq!(executor.calls(), 1);
/// ```
#[derive(Default)]
pub struct RecordingExecutor {
    script: VecDeque<StageStatus>,
    commands: Vec<StageCommand>,
    hook: Option<Hook>,
}

impl RecordingExecutor {
    /// An executor on which every command succeeds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the status returned by the next unscripted call.
    pub fn then(mut self, status: StageStatus) -> Self {
        self.script.push_back(status);
        self
    }

    /// Call `hook` with every command before recording it.
    ///
    /// Useful to observe the file system at the moment a stage starts.
    pub fn with_hook(mut self, hook: impl FnMut(&StageCommand) + 'static) -> Self {
        self.hook = Some(Box::new(hook));
        self
    }

    /// The recorded commands, in call order.
    pub fn commands(&self) -> &[StageCommand] {
        &self.commands
    }

    /// Number of recorded commands.
    pub fn calls(&self) -> usize {
        self.commands.len()
    }

    /// The first argument of every recorded command, e.g. the COLMAP subcommand.
    pub fn subcommands(&self) -> Vec<String> {
        self.commands
            .iter()
            .map(|c| {
                c.args()
                    .first()
                    .map(|a| a.to_string_lossy().into_owned())
                    .unwrap_or_default()
            })
            .collect()
    }
}

impl StageExecutor for RecordingExecutor {
    fn run(&mut self, command: &StageCommand) -> Result<StageStatus, PipelineError> {
        if let Some(hook) = self.hook.as_mut() {
            hook(command);
        }
        self.commands.push(command.clone());
        Ok(self.script.pop_front().unwrap_or(StageStatus::SUCCESS))
    }
}
