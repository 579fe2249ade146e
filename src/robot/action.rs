//! Actions the robot cycles through

use rand::RngCore;

use super::afk::AfkAction;
use super::fish::FishAction;
use crate::desktop::Desktop;
use crate::error::ActionError;

/// What an action may touch while it runs
pub struct ActionContext<'a> {
    pub desktop: &'a dyn Desktop,
    pub rng: &'a mut dyn RngCore,
}

impl<'a> ActionContext<'a> {
    pub fn new(desktop: &'a dyn Desktop, rng: &'a mut dyn RngCore) -> Self {
        Self { desktop, rng }
    }
}

/// How a single `perform` call ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    /// The gate said no this round
    Skipped,
    /// An idle beat was played
    Idled,
    /// A bite was seen at poll `sample` and reeled in
    Caught { sample: u32, magnitude: u64 },
    /// No bite before the fishing deadline
    TimedOut { samples: u32 },
}

/// A configured action. Built once from its parameters, never mutated.
#[derive(Debug, Clone)]
pub enum Action {
    Fish(FishAction),
    Afk(AfkAction),
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::Fish(_) => "fish",
            Action::Afk(_) => "afk",
        }
    }

    /// Run the action once. May block for up to the action's own time budget.
    pub async fn perform(&self, ctx: &mut ActionContext<'_>) -> Result<ActionOutcome, ActionError> {
        match self {
            Action::Fish(action) => action.perform(ctx).await,
            Action::Afk(action) => Ok(action.perform(ctx).await),
        }
    }
}

impl From<FishAction> for Action {
    fn from(action: FishAction) -> Self {
        Action::Fish(action)
    }
}

impl From<AfkAction> for Action {
    fn from(action: AfkAction) -> Self {
        Action::Afk(action)
    }
}
