//! Probabilistic gate deciding whether an action runs this round

use rand::{Rng, RngCore};

/// How often a configured action fires, from the `happens` parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frequency {
    Never,
    Rarely,
    Often,
    Always,
}

impl Frequency {
    /// Parse a `happens` tag. Tags are matched exactly; empty and unknown
    /// tags mean [`Frequency::Never`].
    pub fn parse(tag: &str) -> Self {
        match tag {
            "always" => Frequency::Always,
            "often" => Frequency::Often,
            "rarely" => Frequency::Rarely,
            "never" | "" => Frequency::Never,
            other => {
                tracing::debug!("[GATE] Unknown frequency tag {:?}, treating as never", other);
                Frequency::Never
            }
        }
    }

    pub fn probability(self) -> f32 {
        match self {
            Frequency::Never => 0.0,
            Frequency::Rarely => 0.2,
            Frequency::Often => 0.5,
            Frequency::Always => 1.0,
        }
    }
}

/// Draw once in `[0, 1)` and fire iff the draw is below the probability
pub fn should_perform(frequency: Frequency, rng: &mut dyn RngCore) -> bool {
    rng.random::<f32>() < frequency.probability()
}
