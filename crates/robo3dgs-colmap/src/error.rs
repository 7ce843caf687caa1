use std::path::PathBuf;

use crate::{
    executor::StageStatus,
    pipeline::{PipelineState, Stage, StageEvent},
};

/// Errors raised while inspecting or preparing an experiment directory.
#[derive(Debug, thiserror::Error)]
pub enum LayoutError {
    /// The experiment root does not exist or is not a directory.
    #[error("experiment directory does not exist: {0}")]
    MissingRoot(PathBuf),

    /// The experiment already holds reconstruction state.
    #[error(
        "experiment directory {root} is not clean, remove {} before preprocessing",
        list_paths(.entries)
    )]
    NotClean {
        /// The experiment root.
        root: PathBuf,
        /// The entries that should not exist yet.
        entries: Vec<PathBuf>,
    },

    /// Neither `manual/` nor `config/` holds the known pose set.
    #[error("no manual pose directory found, expected {0}")]
    MissingPoseSet(PathBuf),

    /// A file of the manual pose set is missing.
    #[error("manual pose file is missing: {0}")]
    MissingPoseFile(PathBuf),

    /// Error reading or writing the file system.
    #[error("error reading or writing the experiment directory. {0}")]
    IoError(#[from] std::io::Error),
}

fn list_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Errors raised while running the external pipeline.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// The experiment directory violates a precondition.
    #[error(transparent)]
    Layout(#[from] LayoutError),

    /// The external program could not be started.
    #[error("failed to start `{program}`. {source}")]
    Spawn {
        /// The program that was invoked.
        program: String,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// A stage finished with a non-zero exit status.
    #[error("{stage} failed with {status}")]
    StageFailed {
        /// The failed stage.
        stage: Stage,
        /// Exit status reported by the external tool.
        status: StageStatus,
    },

    /// The state machine received an event it has no transition for.
    #[error("no transition from {state:?} on {event:?}")]
    InvalidTransition {
        /// Current state.
        state: PipelineState,
        /// Offending event.
        event: StageEvent,
    },

    /// Error reading or writing the file system.
    #[error("error reading or writing file. {0}")]
    IoError(#[from] std::io::Error),
}
