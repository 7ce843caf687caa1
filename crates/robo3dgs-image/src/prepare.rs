use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{
    error::ImageError,
    io::{image_format, read_image_any, write_image_any, DEFAULT_JPEG_QUALITY},
};

/// How images are transformed on their way to the destination directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    /// Decode, rotate 180 degrees about the center and re-encode.
    #[default]
    Rotate180,
    /// Copy the file bytes untouched.
    AsIs,
}

/// Options for [`prepare_images`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrepareOptions {
    /// Quality used when re-encoding JPEG files.
    pub jpeg_quality: u8,
}

impl Default for PrepareOptions {
    fn default() -> Self {
        Self {
            jpeg_quality: DEFAULT_JPEG_QUALITY,
        }
    }
}

/// Lists the image files directly inside `dir`, sorted by file name.
///
/// Entries that are not regular files or whose extension is not a known image
/// format are skipped.
pub fn list_images(dir: impl AsRef<Path>) -> Result<Vec<PathBuf>, ImageError> {
    let dir = dir.as_ref();
    if !dir.is_dir() {
        return Err(ImageError::DirectoryDoesNotExist(dir.to_path_buf()));
    }

    let mut images = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && image_format(&path).is_some() {
            images.push(path);
        } else {
            log::debug!("skipping non-image entry {}", path.display());
        }
    }
    images.sort();

    Ok(images)
}

/// Prepares a single image file for the pipeline.
pub fn prepare_image(
    src: impl AsRef<Path>,
    dst: impl AsRef<Path>,
    orientation: Orientation,
    options: &PrepareOptions,
) -> Result<(), ImageError> {
    let (src, dst) = (src.as_ref(), dst.as_ref());
    match orientation {
        Orientation::AsIs => {
            std::fs::copy(src, dst)?;
        }
        Orientation::Rotate180 => {
            let rotated = read_image_any(src)?.rotate_180()?;
            write_image_any(dst, &rotated, options.jpeg_quality)?;
        }
    }
    Ok(())
}

/// Prepares every image of `src_dir` into `dst_dir`, keeping file names.
///
/// The destination directory is created if needed and the source directory is
/// never modified. The first failing file aborts the batch.
///
/// # Arguments
///
/// * `src_dir` - Directory holding the original images, e.g. `experiment/input`.
/// * `dst_dir` - Directory receiving the prepared images, e.g. `experiment/images`.
/// * `orientation` - Transformation applied to every image.
/// * `options` - Encoding options.
///
/// # Returns
///
/// The number of images written.
pub fn prepare_images(
    src_dir: impl AsRef<Path>,
    dst_dir: impl AsRef<Path>,
    orientation: Orientation,
    options: &PrepareOptions,
) -> Result<usize, ImageError> {
    let (src_dir, dst_dir) = (src_dir.as_ref(), dst_dir.as_ref());

    let images = list_images(src_dir)?;
    std::fs::create_dir_all(dst_dir)?;

    for src in &images {
        // list_images only yields paths with a file name
        let Some(file_name) = src.file_name() else {
            continue;
        };
        let dst = dst_dir.join(file_name);
        log::debug!("{:?}: {} -> {}", orientation, src.display(), dst.display());
        prepare_image(src, &dst, orientation, options)?;
    }

    log::info!(
        "prepared {} images from {} into {}",
        images.len(),
        src_dir.display(),
        dst_dir.display()
    );

    Ok(images.len())
}

#[cfg(test)]
mod tests {
    use super::{list_images, prepare_images, Orientation, PrepareOptions};
    use crate::{
        error::ImageError,
        io::{read_image_any, write_image_any},
        GenericImage, Image, ImageSize,
    };
    use rand::Rng;

    fn random_rgb8(size: ImageSize) -> Result<GenericImage, ImageError> {
        let mut rng = rand::rng();
        let data = (0..size.width * size.height * 3)
            .map(|_| rng.random::<u8>())
            .collect();
        Ok(GenericImage::Rgb8(Image::new(size, data)?))
    }

    #[test]
    fn list_images_sorted_and_filtered() -> Result<(), ImageError> {
        let tmp_dir = tempfile::tempdir()?;
        let image = random_rgb8([2, 2].into())?;
        write_image_any(tmp_dir.path().join("0002.png"), &image, 95)?;
        write_image_any(tmp_dir.path().join("0001.png"), &image, 95)?;
        std::fs::write(tmp_dir.path().join("notes.txt"), "not an image")?;
        std::fs::create_dir(tmp_dir.path().join("nested.png"))?;

        let images = list_images(tmp_dir.path())?;
        let names = images
            .iter()
            .filter_map(|p| p.file_name()?.to_str())
            .collect::<Vec<_>>();
        assert_eq!(names, vec!["0001.png", "0002.png"]);
        Ok(())
    }

    #[test]
    fn prepare_missing_source() -> Result<(), ImageError> {
        let tmp_dir = tempfile::tempdir()?;
        let res = prepare_images(
            tmp_dir.path().join("input"),
            tmp_dir.path().join("images"),
            Orientation::Rotate180,
            &PrepareOptions::default(),
        );
        assert!(matches!(res, Err(ImageError::DirectoryDoesNotExist(_))));
        assert!(!tmp_dir.path().join("images").exists());
        Ok(())
    }

    #[test]
    fn prepare_rotates_and_keeps_names() -> Result<(), ImageError> {
        let tmp_dir = tempfile::tempdir()?;
        let input = tmp_dir.path().join("input");
        let images = tmp_dir.path().join("images");
        std::fs::create_dir(&input)?;

        let original = random_rgb8([5, 3].into())?;
        write_image_any(input.join("0001.png"), &original, 95)?;

        let count = prepare_images(&input, &images, Orientation::Rotate180, &Default::default())?;
        assert_eq!(count, 1);

        let rotated = read_image_any(images.join("0001.png"))?;
        assert_eq!(rotated, original.rotate_180()?);

        // the source directory is left untouched
        assert_eq!(read_image_any(input.join("0001.png"))?, original);
        Ok(())
    }

    #[test]
    fn prepare_twice_is_identity() -> Result<(), ImageError> {
        let tmp_dir = tempfile::tempdir()?;
        let (a, b, c) = (
            tmp_dir.path().join("a"),
            tmp_dir.path().join("b"),
            tmp_dir.path().join("c"),
        );
        std::fs::create_dir(&a)?;
        for i in 0..3 {
            let image = random_rgb8([4 + i, 6].into())?;
            write_image_any(a.join(format!("{:04}.png", i)), &image, 95)?;
        }

        let options = PrepareOptions::default();
        prepare_images(&a, &b, Orientation::Rotate180, &options)?;
        prepare_images(&b, &c, Orientation::Rotate180, &options)?;

        for src in list_images(&a)? {
            let name = src.file_name().map(|n| n.to_owned()).unwrap_or_default();
            assert_eq!(read_image_any(&src)?, read_image_any(c.join(name))?);
        }
        Ok(())
    }

    #[test]
    fn prepare_as_is_copies_bytes() -> Result<(), ImageError> {
        let tmp_dir = tempfile::tempdir()?;
        let input = tmp_dir.path().join("input");
        let images = tmp_dir.path().join("images");
        std::fs::create_dir(&input)?;
        write_image_any(input.join("0001.jpg"), &random_rgb8([8, 8].into())?, 80)?;

        prepare_images(&input, &images, Orientation::AsIs, &Default::default())?;
        assert_eq!(
            std::fs::read(input.join("0001.jpg"))?,
            std::fs::read(images.join("0001.jpg"))?
        );
        Ok(())
    }

    #[test]
    fn prepare_aborts_on_corrupt_file() -> Result<(), ImageError> {
        let tmp_dir = tempfile::tempdir()?;
        let input = tmp_dir.path().join("input");
        std::fs::create_dir(&input)?;
        std::fs::write(input.join("0001.jpg"), b"definitely not a jpeg")?;

        let res = prepare_images(
            &input,
            tmp_dir.path().join("images"),
            Orientation::Rotate180,
            &Default::default(),
        );
        assert!(res.is_err());
        Ok(())
    }
}
