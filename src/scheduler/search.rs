//! Multi-rule search.
//!
//! Runs one dispatching simulation per candidate rule, optionally on a
//! worker pool, and keeps the schedule with the smallest makespan.
//!
//! # Determinism
//!
//! Each simulation owns its state and its random source, seeded from the
//! top-level seed and the rule alone. Results land in one slot per rule and
//! are reduced on the calling thread by `(makespan, rule enumeration
//! index)`, so the winner never depends on worker count or completion order.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::DispatchSimulator;
use crate::config::{InstanceLimits, SearchConfig};
use crate::dispatching::{rule_seed, DispatchRule};
use crate::error::{Result, SchedulingError};
use crate::log_summary;
use crate::models::{Instance, Solution};
use crate::validation::validate_instance;

/// Makespan a single rule achieved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleResult {
    /// The rule.
    pub rule: DispatchRule,
    /// Its makespan.
    pub makespan: i64,
}

/// Outcome of a search: the best solution plus every rule's makespan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchReport {
    /// Winning solution; `best.rule` names the rule that produced it.
    pub best: Solution,
    /// Per-rule makespans, in the order the rules were given.
    pub results: Vec<RuleResult>,
}

/// Searches `rules` and returns the best solution.
///
/// Convenience wrapper over [`RuleSearch`] with default limits.
pub fn search_best(
    instance: &Instance,
    rules: &[DispatchRule],
    concurrency_limit: usize,
    seed: u64,
) -> Result<Solution> {
    let config = SearchConfig::new()
        .with_rules(rules.to_vec())
        .with_concurrency_limit(concurrency_limit)
        .with_seed(seed);
    RuleSearch::new(config)
        .run(instance)
        .map(|report| report.best)
}

/// Multi-rule search orchestrator.
///
/// # Example
///
/// ```
/// use u_jobshop::config::SearchConfig;
/// use u_jobshop::models::Instance;
/// use u_jobshop::scheduler::RuleSearch;
///
/// let instance = Instance::from_jobs(vec![
///     vec![(0, 1), (1, 2)],
///     vec![(1, 2), (0, 1)],
/// ]);
/// let search = RuleSearch::new(SearchConfig::new().with_concurrency_limit(4));
/// let report = search.run(&instance).unwrap();
/// assert_eq!(report.best.makespan, 4);
/// assert_eq!(report.results.len(), 7);
/// ```
#[derive(Debug, Clone, Default)]
pub struct RuleSearch {
    config: SearchConfig,
    limits: InstanceLimits,
}

impl RuleSearch {
    /// Creates a search with default limits.
    pub fn new(config: SearchConfig) -> Self {
        Self {
            config,
            limits: InstanceLimits::default(),
        }
    }

    /// Sets the limits used when validating the instance.
    pub fn with_limits(mut self, limits: InstanceLimits) -> Self {
        self.limits = limits;
        self
    }

    /// The search configuration.
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Runs every configured rule and reduces to the best solution.
    ///
    /// # Errors
    /// - [`SchedulingError::NoRules`] if the rule list is empty
    /// - [`SchedulingError::InvalidConcurrency`] if the limit is zero
    /// - [`SchedulingError::InvalidInstance`] if validation fails
    /// - [`SchedulingError::ThreadPool`] if the worker pool cannot start
    pub fn run(&self, instance: &Instance) -> Result<SearchReport> {
        let config = &self.config;
        if config.rules.is_empty() {
            return Err(SchedulingError::NoRules);
        }
        if config.concurrency_limit == 0 {
            return Err(SchedulingError::InvalidConcurrency(0));
        }
        validate_instance(instance, &self.limits).map_err(SchedulingError::InvalidInstance)?;

        let simulator = DispatchSimulator::new(instance)
            .with_limits(self.limits)
            .with_verbosity(config.verbosity);
        let run_rule =
            |&rule: &DispatchRule| simulator.run_validated(rule, rule_seed(config.seed, rule));

        let workers = config.effective_workers();
        log_summary!(
            config.verbosity,
            "Searching {} rules on {}x{} instance with {} worker(s)",
            config.rules.len(),
            instance.num_jobs,
            instance.num_machines,
            workers
        );

        let solutions: Vec<Solution> = if workers == 1 {
            config.rules.iter().map(run_rule).collect()
        } else {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(workers)
                .build()?;
            pool.install(|| config.rules.par_iter().map(run_rule).collect())
        };

        let results: Vec<RuleResult> = solutions
            .iter()
            .map(|s| RuleResult {
                rule: s.rule,
                makespan: s.makespan,
            })
            .collect();
        for r in &results {
            log_summary!(config.verbosity, "  {:<6} makespan {}", r.rule.name(), r.makespan);
        }

        let best = reduce_best(solutions).ok_or(SchedulingError::NoRules)?;
        log_summary!(
            config.verbosity,
            "Best: {} with makespan {}",
            best.rule,
            best.makespan
        );

        Ok(SearchReport { best, results })
    }
}

/// Picks the smallest makespan; ties go to the rule earlier in enumeration
/// order.
fn reduce_best(solutions: Vec<Solution>) -> Option<Solution> {
    solutions
        .into_iter()
        .min_by_key(|s| (s.makespan, s.rule.index()))
}
