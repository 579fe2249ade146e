//! Window management using Windows API

#[cfg(windows)]
use windows::Win32::Foundation::{BOOL, HWND, LPARAM};
#[cfg(windows)]
use windows::Win32::UI::WindowsAndMessaging::{
    EnumWindows, FindWindowW, GetWindowThreadProcessId, IsWindowVisible, SetForegroundWindow,
    ShowWindow, SW_SHOW,
};
#[cfg(windows)]
use windows::core::PCWSTR;

use crate::error::PlatformError;

/// How to find the game client window
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WindowTarget {
    Title(String),
    Process(u32),
}

impl std::fmt::Display for WindowTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WindowTarget::Title(title) => write!(f, "window '{}'", title),
            WindowTarget::Process(pid) => write!(f, "process {}", pid),
        }
    }
}

/// Find a window by its exact title
#[cfg(windows)]
fn find_window_by_title(title: &str) -> Option<HWND> {
    let title_wide: Vec<u16> = title.encode_utf16().chain(std::iter::once(0)).collect();

    unsafe {
        let hwnd = FindWindowW(PCWSTR::null(), PCWSTR(title_wide.as_ptr())).ok()?;
        if hwnd.0 as usize == 0 {
            None
        } else {
            Some(hwnd)
        }
    }
}

/// Find the first visible top-level window owned by a process
#[cfg(windows)]
fn find_window_by_pid(pid: u32) -> Option<HWND> {
    struct Search {
        pid: u32,
        found: Option<HWND>,
    }

    unsafe extern "system" fn visit(hwnd: HWND, lparam: LPARAM) -> BOOL {
        let search = &mut *(lparam.0 as *mut Search);
        let mut owner = 0u32;
        GetWindowThreadProcessId(hwnd, Some(&mut owner as *mut u32));
        if owner == search.pid && IsWindowVisible(hwnd).as_bool() {
            search.found = Some(hwnd);
            // stop enumerating
            return BOOL(0);
        }
        BOOL(1)
    }

    let mut search = Search { pid, found: None };
    unsafe {
        // Returns an error when the callback stops early, the result is in `search`
        let _ = EnumWindows(Some(visit), LPARAM(&mut search as *mut Search as isize));
    }
    search.found
}

/// Bring the game window to the foreground
#[cfg(windows)]
pub fn activate_window(target: &WindowTarget) -> Result<(), PlatformError> {
    let hwnd = match target {
        WindowTarget::Title(title) => find_window_by_title(title),
        WindowTarget::Process(pid) => find_window_by_pid(*pid),
    }
    .ok_or_else(|| PlatformError::WindowNotFound(target.to_string()))?;

    unsafe {
        let _ = ShowWindow(hwnd, SW_SHOW);
        let _ = SetForegroundWindow(hwnd);
    }

    tracing::info!("[WINDOW] Activated {}", target);
    Ok(())
}

#[cfg(not(windows))]
pub fn activate_window(target: &WindowTarget) -> Result<(), PlatformError> {
    tracing::warn!(
        "[WINDOW] Cannot focus {}: window focusing not implemented on this platform",
        target
    );
    Err(PlatformError::Unsupported("activate_window"))
}
