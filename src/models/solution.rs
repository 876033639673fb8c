//! Solution model.

use serde::{Deserialize, Serialize};

use super::Schedule;
use crate::dispatching::DispatchRule;

/// A complete schedule produced by one dispatching-rule run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Solution {
    /// Number of jobs.
    pub num_jobs: usize,
    /// Number of machines.
    pub num_machines: usize,
    /// Every operation's machine and interval.
    pub schedule: Schedule,
    /// Latest job completion time.
    pub makespan: i64,
    /// Rule that produced the schedule.
    pub rule: DispatchRule,
}

impl Solution {
    /// Wraps a finished schedule, computing its makespan.
    pub fn new(num_jobs: usize, num_machines: usize, schedule: Schedule, rule: DispatchRule) -> Self {
        let makespan = schedule.makespan();
        Self {
            num_jobs,
            num_machines,
            schedule,
            makespan,
            rule,
        }
    }

    /// Start times per job, in operation order.
    pub fn start_times(&self) -> Vec<Vec<i64>> {
        self.schedule.start_times()
    }
}
