#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]
#![deny(missing_docs)]

/// Configuration file handling.
pub mod config;

/// The pose-aware COLMAP converter.
pub mod convert;

/// The top-level preprocessing and training driver.
pub mod driver;

/// Error types for the driver and converter.
pub mod error;

/// Invocation of the Gaussian Splatting trainer.
pub mod trainer;

#[doc(inline)]
pub use robo3dgs_colmap as colmap;

#[doc(inline)]
pub use robo3dgs_image as image;

#[doc(inline)]
pub use robo3dgs_poses as poses;
