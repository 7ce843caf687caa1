#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// COLMAP camera model names.
pub mod camera;

/// Construction of the COLMAP command lines.
pub mod command;

/// Error types for the pipeline.
pub mod error;

/// Execution of external commands.
///
/// See [`executor::StageExecutor`] for the seam used to substitute fake tools in tests.
pub mod executor;

/// On-disk layout of an experiment directory.
pub mod layout;

/// Options for the COLMAP invocations.
pub mod options;

/// The fail-fast pipeline state machine and its runner.
pub mod pipeline;

/// Test doubles for [`executor::StageExecutor`].
pub mod testing;

pub use crate::camera::CameraModel;
pub use crate::command::StageCommand;
pub use crate::error::{LayoutError, PipelineError};
pub use crate::executor::{ProcessExecutor, StageExecutor, StageStatus};
pub use crate::layout::ExperimentLayout;
pub use crate::options::ColmapOptions;
pub use crate::pipeline::{
    ColmapPipeline, PipelineReport, PipelineState, PoseMode, Stage, StageEvent,
};
