//! Dispatch simulation, multi-rule search, and KPI evaluation.
//!
//! # Algorithm
//!
//! [`simulate`] is a greedy, priority-driven list scheduler: one committed
//! pass, no backtracking. [`RuleSearch`] runs it once per dispatching rule
//! and keeps the shortest schedule. It is not optimal, but provides fast
//! baseline solutions.
//!
//! # KPI
//!
//! [`ScheduleKpi`] reports makespan, lower-bound gap, utilization, idle
//! time and flow time.
//!
//! # References
//!
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 4, 7
//! - Baker & Trietsch (2019), "Principles of Sequencing and Scheduling"

mod dispatch;
mod kpi;
mod search;

pub use dispatch::{simulate, DispatchSimulator};
pub use kpi::ScheduleKpi;
pub use search::{search_best, RuleResult, RuleSearch, SearchReport};
