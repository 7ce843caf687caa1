use std::path::PathBuf;

use robo3dgs_colmap::{LayoutError, PipelineError};
use robo3dgs_image::ImageError;

/// Errors raised while loading a configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config file {path}. {source}")]
    Read {
        /// The config file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid JSON for the config.
    #[error("failed to parse config file {path}. {source}")]
    Parse {
        /// The config file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: serde_json::Error,
    },
}

/// Errors aborting a driver or converter run.
///
/// A failing trainer is not an error, see [`crate::driver::TrainingOutcome`].
#[derive(Debug, thiserror::Error)]
pub enum DriverError {
    /// The experiment directory violates a precondition.
    #[error(transparent)]
    Layout(#[from] LayoutError),

    /// Preparing the input images failed.
    #[error("failed to prepare images. {0}")]
    Images(#[from] ImageError),

    /// A COLMAP stage failed or could not be started.
    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    /// The configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),
}
