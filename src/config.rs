//! Bot configuration file

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::utils::path::get_data_dir;
use crate::window::WindowTarget;

/// Default configuration file name, looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "bot.json";

/// Parameters handed to an action builder
pub type Params = HashMap<String, String>;

/// One configured action. Order in the file is the execution order.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ActionDefinition {
    pub name: String,
    #[serde(default)]
    pub params: Params,
}

impl ActionDefinition {
    pub fn new(name: impl Into<String>, params: Params) -> Self {
        Self {
            name: name.into(),
            params,
        }
    }
}

/// Game window to focus before the loop starts
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct WindowConfig {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub process_id: Option<u32>,
}

impl WindowConfig {
    /// Process id wins over the title when both are set
    pub fn target(&self) -> Option<WindowTarget> {
        match (self.process_id, &self.title) {
            (Some(pid), _) => Some(WindowTarget::Process(pid)),
            (None, Some(title)) => Some(WindowTarget::Title(title.clone())),
            (None, None) => None,
        }
    }
}

/// What the robot does when an action fails at runtime
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorPolicy {
    /// Stop the robot and exit
    #[default]
    Abort,
    /// Log the failure and carry on with the next action
    Skip,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(rename = "actions")]
    pub action_defs: Vec<ActionDefinition>,
    #[serde(default)]
    pub window: Option<WindowConfig>,
    #[serde(default = "default_action_delay_ms")]
    pub action_delay_ms: u64,
    #[serde(default = "default_startup_delay_ms")]
    pub startup_delay_ms: u64,
    #[serde(default)]
    pub on_action_error: ErrorPolicy,
    #[serde(default = "default_catch_log")]
    pub catch_log: Option<PathBuf>,
}

fn default_action_delay_ms() -> u64 {
    100
}

fn default_startup_delay_ms() -> u64 {
    2000
}

fn default_catch_log() -> Option<PathBuf> {
    Some(get_data_dir().join("logs").join("fishing_log.json"))
}

impl Config {
    /// A config running the given actions with every other setting defaulted
    pub fn with_actions(action_defs: Vec<ActionDefinition>) -> Self {
        Self {
            action_defs,
            window: None,
            action_delay_ms: default_action_delay_ms(),
            startup_delay_ms: default_startup_delay_ms(),
            on_action_error: ErrorPolicy::default(),
            catch_log: None,
        }
    }

    pub fn action_delay(&self) -> Duration {
        Duration::from_millis(self.action_delay_ms)
    }

    pub fn startup_delay(&self) -> Duration {
        Duration::from_millis(self.startup_delay_ms)
    }

    pub fn window_target(&self) -> Option<WindowTarget> {
        self.window.as_ref().and_then(WindowConfig::target)
    }
}

/// Read and parse a config file
pub fn read_config(path: impl AsRef<Path>) -> Result<Config, ConfigError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

pub fn parse_config(content: &str) -> Result<Config, serde_json::Error> {
    serde_json::from_str(content)
}
