//! Scripted desktop shared by the integration tests

#![allow(dead_code)]

use std::sync::Arc;

use image::{Rgba, RgbaImage};
use parking_lot::Mutex;

use wow_fisher::error::PlatformError;
use wow_fisher::robot::fish::SCREEN_CAPTURE_BOX;
use wow_fisher::{Desktop, MouseButton, WindowTarget};

pub const SCREEN_WIDTH: u32 = 1920;
pub const SCREEN_HEIGHT: u32 = 1080;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Key(String),
    Move(i32, i32),
    Click(MouseButton, bool),
    Activate(WindowTarget),
}

struct Inner {
    screen: RgbaImage,
    frames: Vec<RgbaImage>,
    polls: Mutex<usize>,
    cursor: Mutex<(i32, i32)>,
    events: Mutex<Vec<Event>>,
    window_found: bool,
}

/// Desktop returning a fixed screenshot and a scripted list of poll frames.
/// Poll `n` (from 0) gets `frames[n]`, the last frame repeats forever.
#[derive(Clone)]
pub struct FakeDesktop {
    inner: Arc<Inner>,
}

impl FakeDesktop {
    pub fn new(screen: RgbaImage, frames: Vec<RgbaImage>) -> Self {
        Self::with_window(screen, frames, true)
    }

    pub fn with_window(screen: RgbaImage, frames: Vec<RgbaImage>, window_found: bool) -> Self {
        assert!(!frames.is_empty());
        Self {
            inner: Arc::new(Inner {
                screen,
                frames,
                polls: Mutex::new(0),
                cursor: Mutex::new((960, 540)),
                events: Mutex::new(Vec::new()),
                window_found,
            }),
        }
    }

    pub fn events(&self) -> Vec<Event> {
        self.inner.events.lock().clone()
    }

    pub fn polls(&self) -> usize {
        *self.inner.polls.lock()
    }

    pub fn clicks(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, Event::Click(..)))
            .count()
    }
}

impl Desktop for FakeDesktop {
    fn capture_region(
        &self,
        _center_x: i32,
        _center_y: i32,
        _width: u32,
        _height: u32,
    ) -> Result<RgbaImage, PlatformError> {
        let mut polls = self.inner.polls.lock();
        let frame = &self.inner.frames[(*polls).min(self.inner.frames.len() - 1)];
        *polls += 1;
        Ok(frame.clone())
    }

    fn capture_screen(&self) -> Result<RgbaImage, PlatformError> {
        Ok(self.inner.screen.clone())
    }

    fn cursor_position(&self) -> Result<(i32, i32), PlatformError> {
        Ok(*self.inner.cursor.lock())
    }

    fn move_cursor_smooth(&self, x: i32, y: i32) -> Result<(), PlatformError> {
        *self.inner.cursor.lock() = (x, y);
        self.inner.events.lock().push(Event::Move(x, y));
        Ok(())
    }

    fn press_key(&self, key: &str) -> Result<(), PlatformError> {
        self.inner.events.lock().push(Event::Key(key.to_string()));
        Ok(())
    }

    fn click(&self, button: MouseButton, double: bool) -> Result<(), PlatformError> {
        self.inner.events.lock().push(Event::Click(button, double));
        Ok(())
    }

    fn activate_window(&self, target: &WindowTarget) -> Result<(), PlatformError> {
        if !self.inner.window_found {
            return Err(PlatformError::WindowNotFound(target.to_string()));
        }
        self.inner.events.lock().push(Event::Activate(target.clone()));
        Ok(())
    }
}

/// Water with no bobber on it
pub fn empty_screen() -> RgbaImage {
    RgbaImage::from_pixel(SCREEN_WIDTH, SCREEN_HEIGHT, Rgba([70, 110, 90, 255]))
}

/// Water with a blue plus-shaped bobber marker centered on `(x, y)`
pub fn screen_with_bobber(x: u32, y: u32) -> RgbaImage {
    let mut screen = empty_screen();
    let cross = [(0i32, 0i32), (-1, 0), (1, 0), (0, -1), (0, 1), (-2, 0), (2, 0), (0, -2), (0, 2)];
    for (dx, dy) in cross {
        let px = (x as i32 + dx) as u32;
        let py = (y as i32 + dy) as u32;
        screen.put_pixel(px, py, Rgba([15, 25, 220, 255]));
    }
    screen
}

/// The box under the cursor while the bobber floats
pub fn calm_frame() -> RgbaImage {
    RgbaImage::from_fn(SCREEN_CAPTURE_BOX, SCREEN_CAPTURE_BOX, |x, y| {
        Rgba([(40 + x) as u8, (60 + y) as u8, 90, 255])
    })
}

/// The box under the cursor when the bobber splashes
pub fn splash_frame() -> RgbaImage {
    RgbaImage::from_fn(SCREEN_CAPTURE_BOX, SCREEN_CAPTURE_BOX, |x, y| {
        Rgba([(200 + x) as u8, (210 + y) as u8, 240, 255])
    })
}
