//! Dispatching rules and ready-set selection.
//!
//! Provides the closed set of priority rules (SPT, LPT, SRT, MWR, FIFO,
//! MOR, RANDOM) and the ready set they rank at every simulation step.
//!
//! # Usage
//!
//! ```
//! use u_jobshop::dispatching::{DispatchRule, ReadySet, SchedulingContext};
//! use u_jobshop::models::Instance;
//!
//! let instance = Instance::from_jobs(vec![vec![(0, 4)], vec![(0, 2)]]);
//! let mut ready = ReadySet::with_capacity(instance.num_jobs);
//! let mut context = SchedulingContext::new(0);
//!
//! ready.rebuild(&instance, &[0, 0], &instance.remaining_work_table());
//! ready.score(DispatchRule::Spt, &mut context);
//! let (best, _) = ready.select_best().unwrap();
//! assert_eq!(best.job(), 1);
//! ```
//!
//! # References
//!
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 4
//! - Haupt (1989), "A Survey of Priority Rule-Based Scheduling"

mod context;
mod ready_set;
pub mod rules;

pub use context::{SchedulingContext, RANDOM_PRIORITY_RANGE};
pub use ready_set::{select_best, ReadySet};
pub use rules::{rule_seed, DispatchRule};

/// Score returned by a dispatching rule.
///
/// Lower scores = higher priority (scheduled first).
/// This follows the academic convention where SPT = shortest processing time first.
pub type RuleScore = f64;
