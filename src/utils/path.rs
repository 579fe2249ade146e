//! Path utilities for finding data directories

use std::env;
use std::path::PathBuf;

use crate::config::DEFAULT_CONFIG_FILE;

/// Returns the folder where logs and the default config live.
/// Uses the executable directory when a `bot.json` sits next to the binary,
/// otherwise the current working directory.
pub fn get_data_dir() -> PathBuf {
    if let Ok(exe_path) = env::current_exe() {
        if let Some(parent) = exe_path.parent() {
            if parent.join(DEFAULT_CONFIG_FILE).exists() {
                return parent.to_path_buf();
            }
        }
    }

    env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}
