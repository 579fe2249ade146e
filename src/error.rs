//! Error types shared across the bot

use std::num::ParseIntError;
use std::path::PathBuf;

use thiserror::Error;

/// Failure to read the bot configuration file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config file {path:?}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// A single action parameter that could not be interpreted
#[derive(Debug, Error)]
pub enum ParamError {
    #[error("parameter {key:?}: {value:?} is not a valid number")]
    InvalidNumber {
        key: String,
        value: String,
        #[source]
        source: ParseIntError,
    },
    #[error("parameter {key:?}: {value:?} is not an R,G,B colour")]
    InvalidColor { key: String, value: String },
    #[error("parameter {key:?}: {value:?} is not a duration (expected e.g. 150, 150ms or 2s)")]
    InvalidDuration { key: String, value: String },
    #[error("parameter {key:?}: {value:?} is not a boolean")]
    InvalidBool { key: String, value: String },
    #[error("parameter {key:?}: {value:?} is not a key name")]
    UnknownKey { key: String, value: String },
    #[error("parameter {key:?}: unknown bobber locator {value:?} (expected \"blue\" or \"color\")")]
    UnknownLocator { key: String, value: String },
}

/// Failure while turning the configured action list into actions
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("no builder for action {0:?}")]
    NoBuilder(String),
    #[error("cannot build action {name:?}")]
    Action {
        name: String,
        #[source]
        source: ParamError,
    },
}

/// Image persistence and comparison failures
#[derive(Debug, Error)]
pub enum ImageError {
    #[error("cannot load image {path:?}")]
    Load {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("cannot save image {path:?}")]
    Save {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("image bounds not equal: {left:?}, {right:?}")]
    DimensionMismatch { left: (u32, u32), right: (u32, u32) },
}

/// Failures reported by the screen/input layer
#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("screen capture failed")]
    Capture(#[from] anyhow::Error),
    #[error("input injection failed: {0}")]
    Input(String),
    #[error("unknown key {0:?}")]
    UnknownKey(String),
    #[error("window not found: {0}")]
    WindowNotFound(String),
    #[error("{0} is not supported on this platform")]
    Unsupported(&'static str),
}

/// Runtime failure of a single action, handed to the robot loop
#[derive(Debug, Error)]
pub enum ActionError {
    #[error(transparent)]
    Image(#[from] ImageError),
    #[error(transparent)]
    Platform(#[from] PlatformError),
    #[error("cannot prepare capture directory")]
    Captures(#[from] std::io::Error),
}
