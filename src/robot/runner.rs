//! The robot loop: run every configured action in order, forever

use std::path::PathBuf;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;

use super::action::{Action, ActionContext, ActionOutcome};
use super::builder::ActionRegistry;
use crate::config::{Config, ErrorPolicy};
use crate::desktop::Desktop;
use crate::error::{ActionError, BuildError};
use crate::log_main::log_catch;
use crate::window::WindowTarget;

/// Outcome counts for the current run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    pub casts: u32,
    pub catches: u32,
    pub timeouts: u32,
    pub skips: u32,
    pub idles: u32,
    pub failures: u32,
}

impl SessionStats {
    pub fn record(&mut self, outcome: &ActionOutcome) {
        match outcome {
            ActionOutcome::Skipped => self.skips += 1,
            ActionOutcome::Idled => self.idles += 1,
            ActionOutcome::Caught { .. } => {
                self.casts += 1;
                self.catches += 1;
            }
            ActionOutcome::TimedOut { .. } => {
                self.casts += 1;
                self.timeouts += 1;
            }
        }
    }

    /// Share of casts that ended in a catch, in percent
    pub fn rate(&self) -> f64 {
        if self.casts > 0 {
            (self.catches as f64 / self.casts as f64) * 100.0
        } else {
            0.0
        }
    }
}

pub struct Robot {
    actions: Vec<Action>,
    desktop: Box<dyn Desktop>,
    rng: StdRng,
    window: Option<WindowTarget>,
    action_delay: Duration,
    startup_delay: Duration,
    error_policy: ErrorPolicy,
    catch_log: Option<PathBuf>,
    stats: SessionStats,
}

impl Robot {
    /// Build every configured action up front; any failure means no robot
    pub fn new(
        config: &Config,
        registry: &ActionRegistry,
        desktop: Box<dyn Desktop>,
    ) -> Result<Self, BuildError> {
        let actions = registry.build_all(&config.action_defs)?;
        Ok(Self {
            actions,
            desktop,
            rng: StdRng::from_os_rng(),
            window: config.window_target(),
            action_delay: config.action_delay(),
            startup_delay: config.startup_delay(),
            error_policy: config.on_action_error,
            catch_log: config.catch_log.clone(),
            stats: SessionStats::default(),
        })
    }

    /// Replace the random source, for reproducible runs
    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }

    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    /// Focus the game, then cycle through the actions until one fails
    /// under [`ErrorPolicy::Abort`]. Never returns `Ok`.
    pub async fn start(&mut self) -> Result<(), ActionError> {
        if let Some(target) = &self.window {
            self.desktop.activate_window(target)?;
        }
        tokio::time::sleep(self.startup_delay).await;

        if self.actions.is_empty() {
            tracing::warn!("[ROBOT] No actions configured, idling");
            std::future::pending::<()>().await;
        }

        loop {
            self.run_round().await?;
            let s = self.stats;
            tracing::info!(
                "[ROBOT] Round done: casts={}, catches={}, timeouts={}, skips={}, rate={:.1}%",
                s.casts,
                s.catches,
                s.timeouts,
                s.skips,
                s.rate()
            );
        }
    }

    /// Perform each action once, in configuration order
    pub async fn run_round(&mut self) -> Result<Vec<ActionOutcome>, ActionError> {
        let mut outcomes = Vec::with_capacity(self.actions.len());

        for action in &self.actions {
            let mut ctx = ActionContext::new(self.desktop.as_ref(), &mut self.rng);
            match action.perform(&mut ctx).await {
                Ok(outcome) => {
                    self.stats.record(&outcome);
                    if let Some(path) = &self.catch_log {
                        log_catch(path, &outcome);
                    }
                    outcomes.push(outcome);
                }
                Err(e) => {
                    self.stats.failures += 1;
                    match self.error_policy {
                        ErrorPolicy::Abort => {
                            tracing::error!(
                                "[ROBOT] Action {} failed, stopping: {}",
                                action.name(),
                                e
                            );
                            return Err(e);
                        }
                        ErrorPolicy::Skip => {
                            tracing::warn!(
                                "[ROBOT] Action {} failed, skipping: {}",
                                action.name(),
                                e
                            );
                        }
                    }
                }
            }
            tokio::time::sleep(self.action_delay).await;
        }

        Ok(outcomes)
    }
}
