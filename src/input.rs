//! Input simulation module for mouse and keyboard control

#[cfg(windows)]
use enigo::{Button, Coordinate, Direction, Enigo, Key, Keyboard, Mouse, Settings};
#[cfg(windows)]
use parking_lot::Mutex;
#[cfg(windows)]
use std::thread;
#[cfg(windows)]
use std::time::Duration;

use crate::error::PlatformError;

/// Steps used to glide the cursor to its target
pub const SMOOTH_MOVE_STEPS: i32 = 25;
/// Pause between two smooth-move steps, in milliseconds
pub const SMOOTH_MOVE_STEP_MS: u64 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Multi-character key names understood by [`InputService::press_key`]
pub const NAMED_KEYS: &[&str] = &[
    "F1", "F2", "F3", "F4", "F5", "F6", "F7", "F8", "F9", "F10", "F11", "F12", "ESC", "ESCAPE",
    "ENTER", "RETURN", "SPACE", "TAB", "BACKSPACE", "UP", "DOWN", "LEFT", "RIGHT", "HOME", "END",
    "PAGEUP", "PAGEDOWN", "DELETE", "SHIFT", "CTRL", "CONTROL", "ALT",
];

/// Whether `key` is a single character or one of [`NAMED_KEYS`], any case
pub fn is_known_key(key: &str) -> bool {
    key.len() == 1 || NAMED_KEYS.contains(&key.to_uppercase().as_str())
}

/// Intermediate cursor positions from `from` to `to`, ending exactly on `to`
pub fn smooth_path(from: (i32, i32), to: (i32, i32), steps: i32) -> Vec<(i32, i32)> {
    let steps = steps.max(1);
    (1..=steps)
        .map(|i| {
            let x = from.0 + (to.0 - from.0) * i / steps;
            let y = from.1 + (to.1 - from.1) * i / steps;
            (x, y)
        })
        .collect()
}

/// Keyboard and mouse controller
#[cfg(windows)]
pub struct InputService {
    enigo: Mutex<Enigo>,
}

#[cfg(windows)]
impl InputService {
    pub fn new() -> Result<Self, PlatformError> {
        let enigo = Enigo::new(&Settings::default())
            .map_err(|e| PlatformError::Input(format!("failed to create Enigo: {:?}", e)))?;
        Ok(Self { enigo: Mutex::new(enigo) })
    }

    /// Press and release a key
    pub fn press_key(&self, key: &str) -> Result<(), PlatformError> {
        let enigo_key =
            string_to_enigo_key(key).ok_or_else(|| PlatformError::UnknownKey(key.to_string()))?;
        self.enigo
            .lock()
            .key(enigo_key, Direction::Click)
            .map_err(|e| PlatformError::Input(format!("failed to press key '{}': {:?}", key, e)))
    }

    pub fn click(&self, button: MouseButton, double: bool) -> Result<(), PlatformError> {
        let button = match button {
            MouseButton::Left => Button::Left,
            MouseButton::Right => Button::Right,
            MouseButton::Middle => Button::Middle,
        };
        let clicks = if double { 2 } else { 1 };
        let mut enigo = self.enigo.lock();
        for _ in 0..clicks {
            enigo
                .button(button, Direction::Click)
                .map_err(|e| PlatformError::Input(format!("failed to click mouse: {:?}", e)))?;
        }
        Ok(())
    }

    pub fn cursor_position(&self) -> Result<(i32, i32), PlatformError> {
        self.enigo
            .lock()
            .location()
            .map_err(|e| PlatformError::Input(format!("failed to read cursor position: {:?}", e)))
    }

    /// Move mouse to position
    pub fn mouse_move(&self, x: i32, y: i32) -> Result<(), PlatformError> {
        self.enigo
            .lock()
            .move_mouse(x, y, Coordinate::Abs)
            .map_err(|e| {
                PlatformError::Input(format!("failed to move mouse to ({}, {}): {:?}", x, y, e))
            })
    }

    /// Glide the cursor to a position instead of teleporting it
    pub fn mouse_move_smooth(&self, x: i32, y: i32) -> Result<(), PlatformError> {
        let from = self.cursor_position()?;
        for (px, py) in smooth_path(from, (x, y), SMOOTH_MOVE_STEPS) {
            self.mouse_move(px, py)?;
            thread::sleep(Duration::from_millis(SMOOTH_MOVE_STEP_MS));
        }
        Ok(())
    }
}

#[cfg(not(windows))]
pub struct InputService;

#[cfg(not(windows))]
impl InputService {
    pub fn new() -> Result<Self, PlatformError> {
        tracing::warn!("Input simulation not implemented on this platform");
        Ok(Self)
    }

    pub fn press_key(&self, _key: &str) -> Result<(), PlatformError> {
        Err(PlatformError::Unsupported("press_key"))
    }

    pub fn click(&self, _button: MouseButton, _double: bool) -> Result<(), PlatformError> {
        Err(PlatformError::Unsupported("click"))
    }

    pub fn cursor_position(&self) -> Result<(i32, i32), PlatformError> {
        Err(PlatformError::Unsupported("cursor_position"))
    }

    pub fn mouse_move_smooth(&self, _x: i32, _y: i32) -> Result<(), PlatformError> {
        Err(PlatformError::Unsupported("mouse_move_smooth"))
    }
}

/// Convert string key name to enigo Key
#[cfg(windows)]
fn string_to_enigo_key(key: &str) -> Option<Key> {
    // Handle single characters - use lowercase to avoid keyboard layout mapping issues
    if key.len() == 1 {
        let c = key.chars().next()?.to_ascii_lowercase();
        return Some(Key::Unicode(c));
    }

    let key_upper = key.to_uppercase();
    match key_upper.as_str() {
        "F1" => Some(Key::F1),
        "F2" => Some(Key::F2),
        "F3" => Some(Key::F3),
        "F4" => Some(Key::F4),
        "F5" => Some(Key::F5),
        "F6" => Some(Key::F6),
        "F7" => Some(Key::F7),
        "F8" => Some(Key::F8),
        "F9" => Some(Key::F9),
        "F10" => Some(Key::F10),
        "F11" => Some(Key::F11),
        "F12" => Some(Key::F12),
        "ESC" | "ESCAPE" => Some(Key::Escape),
        "ENTER" | "RETURN" => Some(Key::Return),
        "SPACE" => Some(Key::Space),
        "TAB" => Some(Key::Tab),
        "BACKSPACE" => Some(Key::Backspace),
        "UP" => Some(Key::UpArrow),
        "DOWN" => Some(Key::DownArrow),
        "LEFT" => Some(Key::LeftArrow),
        "RIGHT" => Some(Key::RightArrow),
        "HOME" => Some(Key::Home),
        "END" => Some(Key::End),
        "PAGEUP" => Some(Key::PageUp),
        "PAGEDOWN" => Some(Key::PageDown),
        "DELETE" => Some(Key::Delete),
        "SHIFT" => Some(Key::Shift),
        "CTRL" | "CONTROL" => Some(Key::Control),
        "ALT" => Some(Key::Alt),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_smooth_path_ends_on_target() {
        let path = smooth_path((0, 0), (100, -50), 25);
        assert_eq!(path.len(), 25);
        assert_eq!(path.last(), Some(&(100, -50)));
        assert_eq!(path[0], (4, -2));
    }

    #[test]
    fn test_smooth_path_zero_steps() {
        assert_eq!(smooth_path((10, 10), (20, 20), 0), vec![(20, 20)]);
    }

    #[test]
    fn test_is_known_key() {
        assert!(is_known_key("f6"));
        assert!(is_known_key("PageDown"));
        assert!(is_known_key("1"));
        assert!(!is_known_key(""));
        assert!(!is_known_key("f13"));
        assert!(!is_known_key("hyperdrive"));
    }

    #[test]
    #[cfg(windows)]
    fn test_named_keys_all_map_to_enigo() {
        for name in NAMED_KEYS {
            assert!(string_to_enigo_key(name).is_some(), "{}", name);
        }
    }

    #[test]
    #[cfg(windows)]
    fn test_string_to_enigo_key() {
        assert!(string_to_enigo_key("f6").is_some());
        assert!(string_to_enigo_key("F9").is_some());
        assert!(string_to_enigo_key("1").is_some());
        assert!(string_to_enigo_key("INVALID_KEY_NAME_THAT_DOES_NOT_EXIST").is_none());
    }
}
