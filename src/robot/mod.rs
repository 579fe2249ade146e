//! Configured actions and the loop that performs them

pub mod action;
pub mod afk;
pub mod builder;
pub mod fish;
pub mod gate;
pub mod runner;

pub use action::{Action, ActionContext, ActionOutcome};
pub use afk::AfkAction;
pub use builder::{merge_params, ActionBuilder, ActionRegistry};
pub use fish::{BiteDetector, BobberLocator, FishAction};
pub use gate::{should_perform, Frequency};
pub use runner::{Robot, SessionStats};
