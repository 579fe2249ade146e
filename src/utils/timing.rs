//! Randomised waits that keep the bot off a fixed rhythm

use std::ops::Range;
use std::time::Duration;

use rand::{Rng, RngCore};

/// Uniformly sampled delay in `[min_ms, max_ms)` milliseconds
pub fn random_delay(rng: &mut dyn RngCore, millis: Range<u64>) -> Duration {
    if millis.is_empty() {
        return Duration::from_millis(millis.start);
    }
    Duration::from_millis(rng.random_range(millis))
}

/// Sleep for a random duration in the given millisecond range
pub async fn rand_sleep(rng: &mut dyn RngCore, millis: Range<u64>) {
    tokio::time::sleep(random_delay(rng, millis)).await;
}
