//! wow-fisher - fishing bot for World of Warcraft
//!
//! Casts the fishing line, finds the bobber on screen by colour, watches the
//! pixels under it for a bite and reels the fish in with simulated input.

pub mod config;
pub mod desktop;
pub mod error;
pub mod input;
pub mod log_main;
pub mod robot;
pub mod screen_reader;
pub mod utils;
pub mod window;

// Re-exports for convenience
pub use config::{read_config, ActionDefinition, Config, ErrorPolicy, Params};
pub use desktop::{Desktop, SystemDesktop};
pub use error::{ActionError, BuildError, ConfigError, ImageError, ParamError, PlatformError};
pub use input::MouseButton;
pub use robot::{Action, ActionOutcome, ActionRegistry, FishAction, Robot};
pub use window::WindowTarget;
