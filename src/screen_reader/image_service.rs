//! Capture persistence and whole-image comparison

use std::path::Path;

use image::RgbaImage;

use crate::error::ImageError;

/// Load an image from disk as RGBA
pub fn load_image(path: &Path) -> Result<RgbaImage, ImageError> {
    image::open(path)
        .map(|img| img.to_rgba8())
        .map_err(|source| ImageError::Load {
            path: path.to_path_buf(),
            source,
        })
}

/// Save an image, format chosen from the file extension
pub fn save_image(path: &Path, img: &RgbaImage) -> Result<(), ImageError> {
    img.save(path).map_err(|source| ImageError::Save {
        path: path.to_path_buf(),
        source,
    })
}

/// Euclidean distance between two equally sized images: the integer square
/// root of the summed squared differences of every raw channel byte.
pub fn image_diff(a: &RgbaImage, b: &RgbaImage) -> Result<u64, ImageError> {
    if a.dimensions() != b.dimensions() {
        return Err(ImageError::DimensionMismatch {
            left: a.dimensions(),
            right: b.dimensions(),
        });
    }

    let accum: u64 = a
        .as_raw()
        .iter()
        .zip(b.as_raw())
        .map(|(&x, &y)| {
            let d = u64::from(x.abs_diff(y));
            d * d
        })
        .sum();

    Ok(accum.isqrt())
}

/// [`image_diff`] of two images stored on disk
pub fn image_diff_files(a: &Path, b: &Path) -> Result<u64, ImageError> {
    let img_a = load_image(a)?;
    let img_b = load_image(b)?;
    image_diff(&img_a, &img_b)
}
