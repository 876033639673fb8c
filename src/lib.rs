//! Job-shop dispatching for the U-Engine ecosystem.
//!
//! Builds feasible job-shop schedules by greedy list scheduling under
//! priority dispatching rules, and searches all rules (optionally in
//! parallel) for the shortest makespan. The search is reproducible
//! end-to-end from a single seed regardless of thread count.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Instance`, `Schedule`, `Solution`
//! - **`dispatching`**: The closed rule set and ready-set selection
//! - **`scheduler`**: `simulate`, `RuleSearch` / `search_best`, `ScheduleKpi`
//! - **`validation`**: Instance preconditions and schedule feasibility checks
//! - **`io`**: Plain-text instance and solution formats
//! - **`config`**: `SearchConfig`, `InstanceLimits`
//!
//! # Example
//!
//! ```
//! use u_jobshop::io::parse_instance;
//! use u_jobshop::scheduler::search_best;
//! use u_jobshop::dispatching::DispatchRule;
//!
//! let instance = parse_instance("2 2\n0 1 1 2\n1 2 0 1\n").unwrap();
//! let best = search_best(&instance, &DispatchRule::ALL, 2, 42).unwrap();
//! assert_eq!(best.makespan, 4);
//! assert_eq!(best.rule, DispatchRule::Lpt);
//! ```
//!
//! # References
//!
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems"
//! - Haupt (1989), "A Survey of Priority Rule-Based Scheduling"

pub mod logging;

pub mod config;
pub mod dispatching;
pub mod error;
pub mod io;
pub mod models;
pub mod scheduler;
pub mod validation;

pub use error::{Result, SchedulingError};
