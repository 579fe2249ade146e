//! Per-pixel colour maths used to find the bobber

use image::{Rgba, RgbaImage};

pub const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
pub const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);

/// Red and green above this are too bright for the blue bobber marker
pub const LOW_SATURATION_CEILING: u8 = 80;

/// Reach of the cross pattern used by [`find_region_with_color`]
pub const REGION_CROSS_REACH: i64 = 2;

/// Reach of the cross pattern used by [`closest_pixel_to_color`]
pub const CLOSEST_CROSS_REACH: i64 = 4;

/// Pixels this close to the border are ignored by [`closest_pixel_to_color`]
pub const CLOSEST_SCAN_MARGIN: u32 = 100;

/// A best-scoring pixel found by one of the scans
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelMatch {
    pub x: u32,
    pub y: u32,
    pub score: u32,
}

/// Manhattan distance over the RGB channels, alpha ignored
pub fn pixel_distance(a: Rgba<u8>, b: Rgba<u8>) -> u32 {
    a.0[..3]
        .iter()
        .zip(&b.0[..3])
        .map(|(&x, &y)| u32::from(x.abs_diff(y)))
        .sum()
}

/// Offsets of a plus-shaped neighbourhood: the center then each arm, nearest first
fn cross(reach: i64) -> impl Iterator<Item = (i64, i64)> {
    std::iter::once((0, 0)).chain((1..=reach).flat_map(|d| [(-d, 0), (d, 0), (0, -d), (0, d)]))
}

/// Pixel at a signed position, `None` outside the image
fn pixel_at(img: &RgbaImage, x: i64, y: i64) -> Option<Rgba<u8>> {
    let x = u32::try_from(x).ok()?;
    let y = u32::try_from(y).ok()?;
    img.get_pixel_checked(x, y).copied()
}

/// Find the pixel whose cross neighbourhood holds the most pixels exactly
/// equal to `color` (RGB compared, alpha ignored).
///
/// Scans row by row; on equal counts the first pixel in scan order wins.
/// Returns `None` when no pixel of that colour exists.
pub fn find_region_with_color(img: &RgbaImage, color: Rgba<u8>) -> Option<PixelMatch> {
    let mut best: Option<PixelMatch> = None;

    for (x, y, _) in img.enumerate_pixels() {
        let count = cross(REGION_CROSS_REACH)
            .filter_map(|(dx, dy)| pixel_at(img, i64::from(x) + dx, i64::from(y) + dy))
            .filter(|p| p.0[..3] == color.0[..3])
            .count() as u32;

        if count > best.map_or(0, |b| b.score) {
            best = Some(PixelMatch { x, y, score: count });
        }
    }

    best
}

/// Find the pixel whose cross neighbourhood is closest to `color`, summing
/// [`pixel_distance`] over the pattern. The first `margin` columns and rows
/// are skipped; neighbours outside the image count as transparent black.
///
/// Scans column by column; on equal distances the first pixel in that order wins.
pub fn closest_pixel_to_color(
    img: &RgbaImage,
    color: Rgba<u8>,
    margin: u32,
) -> Option<PixelMatch> {
    let mut best: Option<PixelMatch> = None;
    let transparent = Rgba([0, 0, 0, 0]);

    for x in margin..img.width() {
        for y in margin..img.height() {
            let distance = cross(CLOSEST_CROSS_REACH)
                .map(|(dx, dy)| {
                    pixel_at(img, i64::from(x) + dx, i64::from(y) + dy).unwrap_or(transparent)
                })
                .map(|p| pixel_distance(color, p))
                .sum();

            if best.map_or(true, |b| distance < b.score) {
                best = Some(PixelMatch { x, y, score: distance });
            }
        }
    }

    best
}

/// Predicate deciding whether a pixel is "on" in a binary projection
pub trait PixelFilter {
    fn matches(&self, pixel: &Rgba<u8>) -> bool;
}

impl<F: Fn(&Rgba<u8>) -> bool> PixelFilter for F {
    fn matches(&self, pixel: &Rgba<u8>) -> bool {
        self(pixel)
    }
}

/// Saturated blue marker: blue above the threshold and strictly dominant,
/// red and green both dark.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BluePixelFilter {
    pub blue_threshold: u8,
}

impl BluePixelFilter {
    pub fn new(blue_threshold: u8) -> Self {
        Self { blue_threshold }
    }
}

impl PixelFilter for BluePixelFilter {
    fn matches(&self, pixel: &Rgba<u8>) -> bool {
        let [r, g, b, _] = pixel.0;

        // Blue should be the dominant color
        if r >= b || g >= b {
            return false;
        }

        // Red and green should be low
        if r >= LOW_SATURATION_CEILING || g >= LOW_SATURATION_CEILING {
            return false;
        }

        b > self.blue_threshold
    }
}

/// Sets pixels that match the filter to white and all others to black
pub fn toggle_pixels(img: &RgbaImage, filter: &impl PixelFilter) -> RgbaImage {
    RgbaImage::from_fn(img.width(), img.height(), |x, y| {
        if filter.matches(img.get_pixel(x, y)) {
            WHITE
        } else {
            BLACK
        }
    })
}

/// Crop a `width` x `height` box (shrunk to fit) from the middle of `img`.
/// Returns the crop and the position of its top-left corner in `img`.
pub fn centered_crop(img: &RgbaImage, width: u32, height: u32) -> (RgbaImage, (u32, u32)) {
    let width = width.min(img.width());
    let height = height.min(img.height());
    let left = (img.width() - width) / 2;
    let top = (img.height() - height) / 2;
    let crop = image::imageops::crop_imm(img, left, top, width, height).to_image();
    (crop, (left, top))
}
