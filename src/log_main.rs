//! Catch log: one JSON entry per fishing cast

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::robot::ActionOutcome;

/// Log entry for a fishing cast
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatchLogEntry {
    pub timestamp: String,
    #[serde(rename = "catch")]
    pub status: bool,
    /// Poll sample the cast ended on
    pub samples: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub magnitude: Option<u64>,
}

impl CatchLogEntry {
    /// Entry for a finished cast, `None` for outcomes that are not casts
    pub fn from_outcome(outcome: &ActionOutcome) -> Option<Self> {
        let (status, samples, magnitude) = match *outcome {
            ActionOutcome::Caught { sample, magnitude } => (true, sample, Some(magnitude)),
            ActionOutcome::TimedOut { samples } => (false, samples, None),
            ActionOutcome::Skipped | ActionOutcome::Idled => return None,
        };
        Some(Self {
            timestamp: Utc::now().to_rfc3339(),
            status,
            samples,
            magnitude,
        })
    }
}

/// Load every entry of a catch log, empty when missing or unreadable
pub fn load_catches(log_file: &Path) -> Vec<CatchLogEntry> {
    fs::read_to_string(log_file)
        .ok()
        .and_then(|c| serde_json::from_str(&c).ok())
        .unwrap_or_default()
}

/// Append a cast outcome to the catch log. Failures are logged, not returned.
pub fn log_catch(log_file: &Path, outcome: &ActionOutcome) {
    let Some(entry) = CatchLogEntry::from_outcome(outcome) else {
        return;
    };

    if let Some(parent) = log_file.parent() {
        let _ = fs::create_dir_all(parent);
    }

    let mut data = load_catches(log_file);
    data.push(entry);

    match serde_json::to_string_pretty(&data) {
        Ok(content) => {
            if let Err(e) = fs::write(log_file, content) {
                tracing::warn!("[LOG] Failed to write catch log {:?}: {}", log_file, e);
            }
        }
        Err(e) => tracing::warn!("[LOG] Failed to serialize catch log: {}", e),
    }
}
