#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Error types for the image module.
pub mod error;

/// image flipping and rotation module.
pub mod flip;

/// Image buffer types.
pub mod buffer;

/// Reading and writing images from disk.
///
/// See [`io::read_image_any`] for automatic format detection.
pub mod io;

/// Batch preparation of an image directory for COLMAP.
pub mod prepare;

pub use crate::error::ImageError;
pub use crate::buffer::{Image, ImageSize};
pub use crate::io::GenericImage;
pub use crate::prepare::{prepare_images, Orientation, PrepareOptions};
