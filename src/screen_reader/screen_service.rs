//! Screen capture service

use image::RgbaImage;
use screenshots::Screen;
use anyhow::{Result, Context};

/// Region for screenshot capture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub left: i32,
    pub top: i32,
    pub width: u32,
    pub height: u32,
}

impl Region {
    pub fn new(left: i32, top: i32, width: u32, height: u32) -> Self {
        Self { left, top, width, height }
    }

    /// Region of the given size whose center is `(center_x, center_y)`
    pub fn centered(center_x: i32, center_y: i32, width: u32, height: u32) -> Self {
        Self {
            left: center_x - (width / 2) as i32,
            top: center_y - (height / 2) as i32,
            width,
            height,
        }
    }

    /// Shift the region so it lies inside a `screen_width` x `screen_height`
    /// screen, keeping its size whenever the screen is large enough.
    pub fn clamped(self, screen_width: u32, screen_height: u32) -> Self {
        let width = self.width.min(screen_width);
        let height = self.height.min(screen_height);
        let max_left = (screen_width - width) as i32;
        let max_top = (screen_height - height) as i32;
        Self {
            left: self.left.clamp(0, max_left),
            top: self.top.clamp(0, max_top),
            width,
            height,
        }
    }
}

/// Service for capturing screenshots of the primary screen
#[derive(Debug, Default)]
pub struct ScreenService;

impl ScreenService {
    /// Create a new screen service
    pub fn new() -> Self {
        Self
    }

    /// Size of the primary screen
    pub fn screen_size(&self) -> Result<(u32, u32)> {
        let screen = Self::primary()?;
        Ok((screen.display_info.width, screen.display_info.height))
    }

    /// Take a screenshot of the entire primary screen
    pub fn screenshot(&self) -> Result<RgbaImage> {
        self.capture(None)
    }

    /// Capture a region centered on a point, clamped to the screen
    pub fn capture_centered(
        &self,
        center_x: i32,
        center_y: i32,
        width: u32,
        height: u32,
    ) -> Result<RgbaImage> {
        let (screen_width, screen_height) = self.screen_size()?;
        let region = Region::centered(center_x, center_y, width, height)
            .clamped(screen_width, screen_height);
        self.capture(Some(region))
    }

    fn primary() -> Result<Screen> {
        let screens = Screen::all().context("Failed to get screens")?;
        screens.into_iter().next().context("No screens found")
    }

    fn capture(&self, region: Option<Region>) -> Result<RgbaImage> {
        let screen = Self::primary()?;

        let image = if let Some(r) = region {
            screen.capture_area(r.left, r.top, r.width, r.height)
                .context("Failed to capture area")?
        } else {
            screen.capture().context("Failed to capture screen")?
        };

        // screenshots pins its own `image` version, go through raw bytes
        RgbaImage::from_raw(
            image.width(),
            image.height(),
            image.to_vec(),
        ).context("Failed to create image from raw data")
    }
}
