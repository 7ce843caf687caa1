#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Error types for the poses module.
pub mod error;

/// Camera keyframes and their `images.txt` representation.
pub mod keyframe;

/// Trajectory generation.
pub mod trajectory;

pub use crate::error::PoseError;
pub use crate::keyframe::{write_images_txt, CameraKeyframe};
pub use crate::trajectory::{generate_keyframes, TrajectoryConfig};
