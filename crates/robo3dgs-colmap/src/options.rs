use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::camera::CameraModel;

/// Options shared by every COLMAP invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColmapOptions {
    /// The colmap executable, looked up in `PATH` when not absolute.
    pub colmap_binary: PathBuf,
    /// Whether SIFT extraction and matching run on the GPU.
    pub use_gpu: bool,
    /// Camera model used when poses are estimated.
    ///
    /// The known-pose path always extracts with [`CameraModel::SimplePinhole`] since the
    /// intrinsics are taken from the manual `cameras.txt`.
    pub camera_model: CameraModel,
}

impl Default for ColmapOptions {
    fn default() -> Self {
        Self {
            colmap_binary: PathBuf::from("colmap"),
            use_gpu: true,
            camera_model: CameraModel::OpenCv,
        }
    }
}
