use std::path::Path;

use robo3dgs_colmap::ColmapOptions;
use robo3dgs_image::PrepareOptions;
use serde::{Deserialize, Serialize};

use crate::{error::ConfigError, trainer::TrainerOptions};

/// Settings of the external tools, loadable from a JSON file.
///
/// Every field is optional in the file, missing ones take their default.
///
/// ```json
/// {
///   "colmap": { "colmap_binary": "/opt/colmap/bin/colmap", "use_gpu": false },
///   "trainer": { "python": "python3", "train_script": "../gaussian-splatting/train.py" },
///   "images": { "jpeg_quality": 100 }
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Robo3dgsConfig {
    /// COLMAP invocation options.
    pub colmap: ColmapOptions,
    /// Trainer invocation options.
    pub trainer: TrainerOptions,
    /// Image preparation options.
    pub images: PrepareOptions,
}

impl Robo3dgsConfig {
    /// Read the config from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Read the config from `path` if given, otherwise use the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => {
                log::info!("loading config from {}", path.display());
                Self::from_json_file(path)
            }
            None => Ok(Self::default()),
        }
    }
}
