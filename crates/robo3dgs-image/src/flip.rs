use rayon::{
    iter::{IndexedParallelIterator, ParallelIterator},
    slice::{ParallelSlice, ParallelSliceMut},
};

use crate::{buffer::Image, error::ImageError};

/// Flip the input image horizontally.
///
/// # Arguments
///
/// * `src` - The input image with shape (H, W, C).
///
/// # Returns
///
/// The flipped image.
///
/// # Example
///
/// ```
/// use robo3dgs_image::{Image, ImageSize};
/// use robo3dgs_image::flip::horizontal_flip;
///
/// let image = Image::<f32, 3>::new(
///     ImageSize {
///         width: 2,
///         height: 3,
///     },
///     vec![0f32; 2 * 3 * 3],
/// )
/// .unwrap();
///
/// let flipped: Image<f32, 3> = horizontal_flip(&image).unwrap();
///
/// assert_eq!(flipped.size().width, 2);
/// assert_eq!(flipped.size().height, 3);
/// ```
pub fn horizontal_flip<T, const C: usize>(src: &Image<T, C>) -> Result<Image<T, C>, ImageError>
where
    T: Clone + Send + Sync,
{
    let mut dst = src.clone();
    let row_len = src.cols() * C;
    if row_len == 0 {
        return Ok(dst);
    }

    dst.as_slice_mut()
        .par_chunks_exact_mut(row_len)
        .zip_eq(src.as_slice().par_chunks_exact(row_len))
        .for_each(|(dst_row, src_row)| {
            dst_row
                .chunks_exact_mut(C)
                .zip(src_row.chunks_exact(C).rev())
                .for_each(|(dst_pixel, src_pixel)| dst_pixel.clone_from_slice(src_pixel));
        });

    Ok(dst)
}

/// Flip the input image vertically.
///
/// # Arguments
///
/// * `src` - The input image with shape (H, W, C).
///
/// # Returns
///
/// The flipped image.
pub fn vertical_flip<T, const C: usize>(src: &Image<T, C>) -> Result<Image<T, C>, ImageError>
where
    T: Clone + Send + Sync,
{
    let mut dst = src.clone();
    let row_len = src.cols() * C;
    if row_len == 0 {
        return Ok(dst);
    }

    dst.as_slice_mut()
        .par_chunks_exact_mut(row_len)
        .zip_eq(src.as_slice().par_chunks_exact(row_len).rev())
        .for_each(|(dst_row, src_row)| dst_row.clone_from_slice(src_row));

    Ok(dst)
}

/// Rotate the input image 180 degrees about its center.
///
/// Equivalent to a vertical flip followed by a horizontal flip, done in a single pass.
/// The operation is an involution: applying it twice yields the input back.
///
/// # Arguments
///
/// * `src` - The input image with shape (H, W, C).
///
/// # Example
///
/// ```
/// use robo3dgs_image::{Image, ImageSize};
/// use robo3dgs_image::flip::rotate_180;
///
/// let image = Image::<u8, 1>::new(
///     ImageSize {
///         width: 2,
///         height: 2,
///     },
///     vec![0, 1, 2, 3],
/// )
/// .unwrap();
///
/// let rotated = rotate_180(&image).unwrap();
/// assert_eq!(rotated.as_slice(), &[3, 2, 1, 0]);
/// ```
pub fn rotate_180<T, const C: usize>(src: &Image<T, C>) -> Result<Image<T, C>, ImageError>
where
    T: Clone + Send + Sync,
{
    let mut dst = src.clone();
    let row_len = src.cols() * C;
    if row_len == 0 {
        return Ok(dst);
    }

    dst.as_slice_mut()
        .par_chunks_exact_mut(row_len)
        .zip_eq(src.as_slice().par_chunks_exact(row_len).rev())
        .for_each(|(dst_row, src_row)| {
            dst_row
                .chunks_exact_mut(C)
                .zip(src_row.chunks_exact(C).rev())
                .for_each(|(dst_pixel, src_pixel)| dst_pixel.clone_from_slice(src_pixel));
        });

    Ok(dst)
}

#[cfg(test)]
mod tests {
    use crate::{Image, ImageError, ImageSize};
    use rand::Rng;

    #[test]
    fn test_hflip() -> Result<(), ImageError> {
        let image = Image::<_, 1>::new(
            ImageSize {
                width: 2,
                height: 3,
            },
            vec![0u8, 1, 2, 3, 4, 5],
        )?;
        let data_expected = vec![1u8, 0, 3, 2, 5, 4];
        let flipped = super::horizontal_flip(&image)?;
        assert_eq!(flipped.as_slice(), &data_expected);
        Ok(())
    }

    #[test]
    fn test_vflip() -> Result<(), ImageError> {
        let image = Image::<_, 1>::new(
            ImageSize {
                width: 2,
                height: 3,
            },
            vec![0u8, 1, 2, 3, 4, 5],
        )?;
        let data_expected = vec![4u8, 5, 2, 3, 0, 1];
        let flipped = super::vertical_flip(&image)?;
        assert_eq!(flipped.as_slice(), &data_expected);
        Ok(())
    }

    #[test]
    fn test_rotate_180_keeps_channel_order() -> Result<(), ImageError> {
        let image = Image::<_, 3>::new(
            ImageSize {
                width: 2,
                height: 1,
            },
            vec![1u8, 2, 3, 4, 5, 6],
        )?;
        let rotated = super::rotate_180(&image)?;
        assert_eq!(rotated.as_slice(), &[4u8, 5, 6, 1, 2, 3]);
        Ok(())
    }

    #[test]
    fn test_rotate_180_matches_flips() -> Result<(), ImageError> {
        let mut rng = rand::rng();
        let size = ImageSize {
            width: 7,
            height: 5,
        };
        let data = (0..size.width * size.height * 3)
            .map(|_| rng.random::<u16>())
            .collect();
        let image = Image::<u16, 3>::new(size, data)?;

        let rotated = super::rotate_180(&image)?;
        let flipped = super::horizontal_flip(&super::vertical_flip(&image)?)?;
        assert_eq!(rotated, flipped);
        Ok(())
    }

    #[test]
    fn test_rotate_180_involution() -> Result<(), ImageError> {
        let mut rng = rand::rng();
        for (width, height) in [(1, 1), (4, 3), (33, 17)] {
            let size = ImageSize { width, height };
            let data = (0..width * height * 4).map(|_| rng.random::<u8>()).collect();
            let image = Image::<u8, 4>::new(size, data)?;
            let twice = super::rotate_180(&super::rotate_180(&image)?)?;
            assert_eq!(twice, image);
        }
        Ok(())
    }

    #[test]
    fn test_rotate_180_empty() -> Result<(), ImageError> {
        let image = Image::<u8, 1>::new([0, 0].into(), vec![])?;
        let rotated = super::rotate_180(&image)?;
        assert!(rotated.as_slice().is_empty());
        Ok(())
    }
}
