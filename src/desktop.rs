//! The screen and input surface the actions drive

use image::RgbaImage;

use crate::error::PlatformError;
use crate::input::{InputService, MouseButton};
use crate::screen_reader::ScreenService;
use crate::window::{self, WindowTarget};

/// Everything an action may do to the machine it runs on.
///
/// Coordinates are screen pixels of the primary screen.
pub trait Desktop {
    /// Capture a `width` x `height` box centered on a point. Boxes near the
    /// screen edge are shifted inwards, never shrunk.
    fn capture_region(
        &self,
        center_x: i32,
        center_y: i32,
        width: u32,
        height: u32,
    ) -> Result<RgbaImage, PlatformError>;

    /// Capture the whole primary screen
    fn capture_screen(&self) -> Result<RgbaImage, PlatformError>;

    fn cursor_position(&self) -> Result<(i32, i32), PlatformError>;

    fn move_cursor_smooth(&self, x: i32, y: i32) -> Result<(), PlatformError>;

    fn press_key(&self, key: &str) -> Result<(), PlatformError>;

    fn click(&self, button: MouseButton, double: bool) -> Result<(), PlatformError>;

    fn activate_window(&self, target: &WindowTarget) -> Result<(), PlatformError>;
}

/// [`Desktop`] backed by the real screen, mouse and keyboard
pub struct SystemDesktop {
    screen: ScreenService,
    input: InputService,
}

impl SystemDesktop {
    pub fn new() -> Result<Self, PlatformError> {
        Ok(Self {
            screen: ScreenService::new(),
            input: InputService::new()?,
        })
    }
}

impl Desktop for SystemDesktop {
    fn capture_region(
        &self,
        center_x: i32,
        center_y: i32,
        width: u32,
        height: u32,
    ) -> Result<RgbaImage, PlatformError> {
        Ok(self.screen.capture_centered(center_x, center_y, width, height)?)
    }

    fn capture_screen(&self) -> Result<RgbaImage, PlatformError> {
        Ok(self.screen.screenshot()?)
    }

    fn cursor_position(&self) -> Result<(i32, i32), PlatformError> {
        self.input.cursor_position()
    }

    fn move_cursor_smooth(&self, x: i32, y: i32) -> Result<(), PlatformError> {
        self.input.mouse_move_smooth(x, y)
    }

    fn press_key(&self, key: &str) -> Result<(), PlatformError> {
        self.input.press_key(key)
    }

    fn click(&self, button: MouseButton, double: bool) -> Result<(), PlatformError> {
        self.input.click(button, double)
    }

    fn activate_window(&self, target: &WindowTarget) -> Result<(), PlatformError> {
        window::activate_window(target)
    }
}
