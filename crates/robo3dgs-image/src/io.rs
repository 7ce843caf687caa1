use std::{fs::File, io::BufWriter, path::Path};

use image::{codecs::jpeg::JpegEncoder, DynamicImage, ImageBuffer, ImageFormat};

use crate::{
    buffer::{Image, ImageSize},
    error::ImageError,
    flip,
};

/// Default JPEG quality used when re-encoding images.
pub const DEFAULT_JPEG_QUALITY: u8 = 95;

/// A generic image type that can be any of the supported pixel layouts.
#[derive(Clone, Debug, PartialEq)]
pub enum GenericImage {
    /// 8-bit grayscale image
    L8(Image<u8, 1>),
    /// 8-bit grayscale image with alpha channel
    La8(Image<u8, 2>),
    /// 8-bit RGB image
    Rgb8(Image<u8, 3>),
    /// 8-bit RGB image with alpha channel
    Rgba8(Image<u8, 4>),
    /// 16-bit grayscale image
    L16(Image<u16, 1>),
    /// 16-bit grayscale image with alpha channel
    La16(Image<u16, 2>),
    /// 16-bit RGB image
    Rgb16(Image<u16, 3>),
    /// 16-bit RGB image with alpha channel
    Rgba16(Image<u16, 4>),
    /// 32-bit float RGB image
    Rgb32F(Image<f32, 3>),
    /// 32-bit float RGB image with alpha channel
    Rgba32F(Image<f32, 4>),
}

// applies the same expression to the inner image of every variant
macro_rules! each_variant {
    ($value:expr, $img:ident => $body:expr) => {
        match $value {
            GenericImage::L8($img) => $body,
            GenericImage::La8($img) => $body,
            GenericImage::Rgb8($img) => $body,
            GenericImage::Rgba8($img) => $body,
            GenericImage::L16($img) => $body,
            GenericImage::La16($img) => $body,
            GenericImage::Rgb16($img) => $body,
            GenericImage::Rgba16($img) => $body,
            GenericImage::Rgb32F($img) => $body,
            GenericImage::Rgba32F($img) => $body,
        }
    };
}

// same as each_variant, rewrapping the result in the original variant
macro_rules! map_variant {
    ($value:expr, $img:ident => $body:expr) => {
        match $value {
            GenericImage::L8($img) => GenericImage::L8($body),
            GenericImage::La8($img) => GenericImage::La8($body),
            GenericImage::Rgb8($img) => GenericImage::Rgb8($body),
            GenericImage::Rgba8($img) => GenericImage::Rgba8($body),
            GenericImage::L16($img) => GenericImage::L16($body),
            GenericImage::La16($img) => GenericImage::La16($body),
            GenericImage::Rgb16($img) => GenericImage::Rgb16($body),
            GenericImage::Rgba16($img) => GenericImage::Rgba16($body),
            GenericImage::Rgb32F($img) => GenericImage::Rgb32F($body),
            GenericImage::Rgba32F($img) => GenericImage::Rgba32F($body),
        }
    };
}

impl GenericImage {
    /// The size of the wrapped image in pixels.
    pub fn size(&self) -> ImageSize {
        each_variant!(self, img => img.size())
    }

    /// The number of channels of the wrapped image.
    pub fn num_channels(&self) -> usize {
        each_variant!(self, img => img.num_channels())
    }

    /// Rotate the wrapped image 180 degrees, keeping its pixel layout.
    pub fn rotate_180(&self) -> Result<GenericImage, ImageError> {
        Ok(map_variant!(self, img => flip::rotate_180(img)?))
    }

    fn from_dynamic(img: DynamicImage) -> Result<Self, ImageError> {
        let size = ImageSize {
            width: img.width() as usize,
            height: img.height() as usize,
        };

        let image = match img {
            DynamicImage::ImageLuma8(buf) => GenericImage::L8(Image::new(size, buf.into_raw())?),
            DynamicImage::ImageLumaA8(buf) => GenericImage::La8(Image::new(size, buf.into_raw())?),
            DynamicImage::ImageRgb8(buf) => GenericImage::Rgb8(Image::new(size, buf.into_raw())?),
            DynamicImage::ImageRgba8(buf) => {
                GenericImage::Rgba8(Image::new(size, buf.into_raw())?)
            }
            DynamicImage::ImageLuma16(buf) => {
                GenericImage::L16(Image::new(size, buf.into_raw())?)
            }
            DynamicImage::ImageLumaA16(buf) => {
                GenericImage::La16(Image::new(size, buf.into_raw())?)
            }
            DynamicImage::ImageRgb16(buf) => {
                GenericImage::Rgb16(Image::new(size, buf.into_raw())?)
            }
            DynamicImage::ImageRgba16(buf) => {
                GenericImage::Rgba16(Image::new(size, buf.into_raw())?)
            }
            DynamicImage::ImageRgb32F(buf) => {
                GenericImage::Rgb32F(Image::new(size, buf.into_raw())?)
            }
            DynamicImage::ImageRgba32F(buf) => {
                GenericImage::Rgba32F(Image::new(size, buf.into_raw())?)
            }
            other => return Err(ImageError::UnsupportedColorType(other.color())),
        };

        Ok(image)
    }

    fn into_dynamic(self) -> Result<DynamicImage, ImageError> {
        let size = self.size();
        let (w, h) = (size.width as u32, size.height as u32);
        let color = self.color_type();

        let dynamic = match self {
            GenericImage::L8(img) => {
                ImageBuffer::from_raw(w, h, img.into_vec()).map(DynamicImage::ImageLuma8)
            }
            GenericImage::La8(img) => {
                ImageBuffer::from_raw(w, h, img.into_vec()).map(DynamicImage::ImageLumaA8)
            }
            GenericImage::Rgb8(img) => {
                ImageBuffer::from_raw(w, h, img.into_vec()).map(DynamicImage::ImageRgb8)
            }
            GenericImage::Rgba8(img) => {
                ImageBuffer::from_raw(w, h, img.into_vec()).map(DynamicImage::ImageRgba8)
            }
            GenericImage::L16(img) => {
                ImageBuffer::from_raw(w, h, img.into_vec()).map(DynamicImage::ImageLuma16)
            }
            GenericImage::La16(img) => {
                ImageBuffer::from_raw(w, h, img.into_vec()).map(DynamicImage::ImageLumaA16)
            }
            GenericImage::Rgb16(img) => {
                ImageBuffer::from_raw(w, h, img.into_vec()).map(DynamicImage::ImageRgb16)
            }
            GenericImage::Rgba16(img) => {
                ImageBuffer::from_raw(w, h, img.into_vec()).map(DynamicImage::ImageRgba16)
            }
            GenericImage::Rgb32F(img) => {
                ImageBuffer::from_raw(w, h, img.into_vec()).map(DynamicImage::ImageRgb32F)
            }
            GenericImage::Rgba32F(img) => {
                ImageBuffer::from_raw(w, h, img.into_vec()).map(DynamicImage::ImageRgba32F)
            }
        };

        // the buffer length is checked by `Image::new`, so this only fails on u32 overflow
        dynamic.ok_or(ImageError::UnsupportedColorType(color))
    }

    fn color_type(&self) -> image::ColorType {
        match self {
            GenericImage::L8(_) => image::ColorType::L8,
            GenericImage::La8(_) => image::ColorType::La8,
            GenericImage::Rgb8(_) => image::ColorType::Rgb8,
            GenericImage::Rgba8(_) => image::ColorType::Rgba8,
            GenericImage::L16(_) => image::ColorType::L16,
            GenericImage::La16(_) => image::ColorType::La16,
            GenericImage::Rgb16(_) => image::ColorType::Rgb16,
            GenericImage::Rgba16(_) => image::ColorType::Rgba16,
            GenericImage::Rgb32F(_) => image::ColorType::Rgb32F,
            GenericImage::Rgba32F(_) => image::ColorType::Rgba32F,
        }
    }
}

/// Returns the image format implied by the file extension, if any.
pub fn image_format(file_path: impl AsRef<Path>) -> Option<ImageFormat> {
    ImageFormat::from_path(file_path).ok()
}

/// Reads an image from the given file path.
///
/// The method tries to read from any image format supported by the image crate.
///
/// # Arguments
///
/// * `file_path` - The path to a valid image file.
///
/// # Returns
///
/// An image containing the image data, tagged with its pixel layout.
pub fn read_image_any(file_path: impl AsRef<Path>) -> Result<GenericImage, ImageError> {
    let file_path = file_path.as_ref();

    // verify the file exists
    if !file_path.exists() {
        return Err(ImageError::FileDoesNotExist(file_path.to_path_buf()));
    }

    let img = image::ImageReader::open(file_path)?
        .with_guessed_format()?
        .decode()?;

    GenericImage::from_dynamic(img)
}

/// Writes an image to the given file path.
///
/// The output format is taken from the file extension. JPEG output is encoded with
/// `jpeg_quality`; JPEG has no alpha or 16-bit support, so such images are converted
/// to 8-bit RGB / luma first.
///
/// # Arguments
///
/// * `file_path` - The destination path. Its extension selects the format.
/// * `image` - The image to encode.
/// * `jpeg_quality` - Quality in `1..=100` used for JPEG output.
pub fn write_image_any(
    file_path: impl AsRef<Path>,
    image: &GenericImage,
    jpeg_quality: u8,
) -> Result<(), ImageError> {
    let file_path = file_path.as_ref();
    let format = image_format(file_path)
        .ok_or_else(|| ImageError::InvalidFileExtension(file_path.to_path_buf()))?;

    let dynamic = image.clone().into_dynamic()?;

    match format {
        ImageFormat::Jpeg => {
            let dynamic = match dynamic {
                DynamicImage::ImageLuma8(_) | DynamicImage::ImageRgb8(_) => dynamic,
                DynamicImage::ImageLuma16(_) | DynamicImage::ImageLumaA8(_) => {
                    DynamicImage::ImageLuma8(dynamic.into_luma8())
                }
                other => DynamicImage::ImageRgb8(other.into_rgb8()),
            };
            let writer = BufWriter::new(File::create(file_path)?);
            let encoder = JpegEncoder::new_with_quality(writer, jpeg_quality.clamp(1, 100));
            dynamic.write_with_encoder(encoder)?;
        }
        format => dynamic.save_with_format(file_path, format)?,
    }

    Ok(())
}
