//! Idle beat between fishing casts

use std::time::Duration;

use once_cell::sync::Lazy;

use super::action::{Action, ActionContext, ActionOutcome};
use super::builder::merge_params;
use super::gate::{should_perform, Frequency};
use crate::config::Params;
use crate::error::ParamError;

/// How long an AFK beat lasts
pub const AFK_DURATION: Duration = Duration::from_secs(1);

static AFK_DEFAULT_PARAMS: Lazy<Params> = Lazy::new(|| {
    let mut m = Params::new();
    m.insert("happens".to_string(), "often".to_string());
    m
});

/// Stands still for a moment, the way a player looks away from the screen
#[derive(Debug, Clone, PartialEq)]
pub struct AfkAction {
    happens: Frequency,
}

impl AfkAction {
    pub fn new(happens: Frequency) -> Self {
        Self { happens }
    }

    pub fn happens(&self) -> Frequency {
        self.happens
    }

    pub fn build_action(params: &Params) -> Result<Action, ParamError> {
        let p = merge_params(&AFK_DEFAULT_PARAMS, params);
        let happens = p.get("happens").map(String::as_str).unwrap_or_default();
        Ok(AfkAction::new(Frequency::parse(happens)).into())
    }

    pub async fn perform(&self, ctx: &mut ActionContext<'_>) -> ActionOutcome {
        if !should_perform(self.happens, ctx.rng) {
            tracing::info!("[AFK] Skipping action: AFK");
            return ActionOutcome::Skipped;
        }

        tracing::info!("[AFK] Doing action: AFK");
        // TODO: sample the idle time from user supplied min/max duration params
        tokio::time::sleep(AFK_DURATION).await;
        ActionOutcome::Idled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::robot::builder::params;

    #[test]
    fn test_default_happens_often() {
        let action = AfkAction::build_action(&Params::new()).unwrap();
        assert!(matches!(action, Action::Afk(ref a) if a.happens() == Frequency::Often));
    }

    #[test]
    fn test_user_happens_overrides_default() {
        let action = AfkAction::build_action(&params([("happens", "rarely")])).unwrap();
        assert!(matches!(action, Action::Afk(ref a) if a.happens() == Frequency::Rarely));
    }
}
