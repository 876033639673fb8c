//! Per-run scheduling context for dispatching rule evaluation.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::RuleScore;

/// Exclusive upper bound of random priorities.
pub const RANDOM_PRIORITY_RANGE: u32 = 1000;

/// Runtime state passed to dispatching rules during one simulation run.
///
/// Owns the run's random source, so concurrently running simulations never
/// share generator state. Two contexts built from the same seed produce the
/// same draws.
#[derive(Debug, Clone)]
pub struct SchedulingContext {
    /// Number of operations committed so far in this run.
    pub step: usize,
    rng: SmallRng,
}

impl SchedulingContext {
    /// Creates a context whose random source is seeded with `seed`.
    pub fn new(seed: u64) -> Self {
        Self {
            step: 0,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Draws a random priority in `[0, RANDOM_PRIORITY_RANGE)`.
    pub fn random_priority(&mut self) -> RuleScore {
        self.rng.random_range(0..RANDOM_PRIORITY_RANGE) as f64
    }

    /// Marks one more operation as committed.
    pub fn advance(&mut self) {
        self.step += 1;
    }
}
