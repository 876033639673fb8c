//! Configuration types for the solver.

use serde::{Deserialize, Serialize};

use crate::dispatching::DispatchRule;
use crate::logging::VERBOSITY_SILENT;

/// Top-level seed used when none is given.
pub const DEFAULT_SEED: u64 = 42;

/// Default maximum number of jobs accepted.
pub const DEFAULT_MAX_JOBS: usize = 1000;

/// Default maximum number of machines accepted.
pub const DEFAULT_MAX_MACHINES: usize = 1000;

/// Configuration for the multi-rule search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Rules to evaluate. Ties are broken by enumeration order, not list order.
    pub rules: Vec<DispatchRule>,
    /// Maximum number of simulations run at once.
    pub concurrency_limit: usize,
    /// Top-level seed; per-rule seeds are derived from it.
    pub seed: u64,
    /// Logging verbosity (see [`crate::logging`]).
    pub verbosity: u8,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            rules: DispatchRule::ALL.to_vec(),
            concurrency_limit: 1,
            seed: DEFAULT_SEED,
            verbosity: VERBOSITY_SILENT,
        }
    }
}

impl SearchConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the rules to evaluate.
    pub fn with_rules(mut self, rules: impl Into<Vec<DispatchRule>>) -> Self {
        self.rules = rules.into();
        self
    }

    /// Sets the concurrency limit.
    pub fn with_concurrency_limit(mut self, limit: usize) -> Self {
        self.concurrency_limit = limit;
        self
    }

    /// Sets the top-level seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Sets the logging verbosity.
    pub fn with_verbosity(mut self, verbosity: u8) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Workers actually used: never more than there are rules.
    pub fn effective_workers(&self) -> usize {
        self.concurrency_limit.min(self.rules.len()).max(1)
    }
}

/// Size limits an instance must respect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstanceLimits {
    /// Maximum number of jobs.
    pub max_jobs: usize,
    /// Maximum number of machines.
    pub max_machines: usize,
}

impl Default for InstanceLimits {
    fn default() -> Self {
        Self {
            max_jobs: DEFAULT_MAX_JOBS,
            max_machines: DEFAULT_MAX_MACHINES,
        }
    }
}

impl InstanceLimits {
    /// Creates limits.
    pub fn new(max_jobs: usize, max_machines: usize) -> Self {
        Self {
            max_jobs,
            max_machines,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = SearchConfig::default();
        assert_eq!(cfg.rules, DispatchRule::ALL.to_vec());
        assert_eq!(cfg.concurrency_limit, 1);
        assert_eq!(cfg.seed, DEFAULT_SEED);
        assert_eq!(cfg.verbosity, VERBOSITY_SILENT);

        let limits = InstanceLimits::default();
        assert_eq!(limits.max_jobs, DEFAULT_MAX_JOBS);
        assert_eq!(limits.max_machines, DEFAULT_MAX_MACHINES);
    }

    #[test]
    fn test_builder() {
        let cfg = SearchConfig::new()
            .with_rules([DispatchRule::Spt, DispatchRule::Random])
            .with_concurrency_limit(8)
            .with_seed(7)
            .with_verbosity(2);
        assert_eq!(cfg.rules.len(), 2);
        assert_eq!(cfg.seed, 7);
        assert_eq!(cfg.verbosity, 2);
        assert_eq!(cfg.effective_workers(), 2);
    }

    #[test]
    fn test_effective_workers_capped() {
        let cfg = SearchConfig::new().with_concurrency_limit(64);
        assert_eq!(cfg.effective_workers(), 7);
        let cfg = SearchConfig::new().with_concurrency_limit(3);
        assert_eq!(cfg.effective_workers(), 3);
    }
}
