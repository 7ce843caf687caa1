use std::path::PathBuf;

/// An error type for the image module.
#[derive(thiserror::Error, Debug)]
pub enum ImageError {
    /// Error when channel and shape are not valid.
    #[error("Data length ({0}) does not match the image size ({1})")]
    InvalidChannelShape(usize, usize),

    /// Error when the file does not exist.
    #[error("File does not exist: {0}")]
    FileDoesNotExist(PathBuf),

    /// The directory to read images from does not exist.
    #[error("Image directory does not exist: {0}")]
    DirectoryDoesNotExist(PathBuf),

    /// The file extension does not map to a known image format.
    #[error("File does not have a valid image extension: {0}")]
    InvalidFileExtension(PathBuf),

    /// The decoded pixel layout has no [`crate::GenericImage`] counterpart.
    #[error("Unsupported pixel layout: {0:?}")]
    UnsupportedColorType(image::ColorType),

    /// Error to open, read or write the file.
    #[error("Failed to manipulate the file. {0}")]
    FileError(#[from] std::io::Error),

    /// Error to decode or encode the image.
    #[error("Failed to decode or encode the image. {0}")]
    CodecError(#[from] image::ImageError),
}
