//! Per-cast capture directories

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Scratch directory holding the screenshots of one fishing cast.
///
/// Removed when dropped, whichever way the cast ended, unless it was opened
/// with `keep` set.
#[derive(Debug)]
pub struct CaptureSession {
    dir: TempDir,
}

impl CaptureSession {
    /// Create a fresh `cast-XXXXXX` directory under `captures_dir`
    pub fn create(captures_dir: &Path, keep: bool) -> io::Result<Self> {
        fs::create_dir_all(captures_dir)?;
        let dir = tempfile::Builder::new()
            .prefix("cast-")
            .disable_cleanup(keep)
            .tempdir_in(captures_dir)?;
        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Poll frame `index`, counted from 1
    pub fn frame_path(&self, index: u32) -> PathBuf {
        self.path().join(format!("cap{}.png", index))
    }

    /// Screenshot searched for the bobber
    pub fn lookup_path(&self) -> PathBuf {
        self.path().join("lookup_bobber.png")
    }

    /// Binary projection of the bobber screenshot
    pub fn filtered_lookup_path(&self) -> PathBuf {
        self.path().join("lookup_filtered.png")
    }
}
