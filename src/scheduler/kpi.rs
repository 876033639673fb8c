//! Schedule quality metrics (KPIs).
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Makespan (C_max) | Latest completion time |
//! | Lower Bound | max(busiest machine load, longest job) |
//! | Gap | (makespan - lower bound) / lower bound |
//! | Idle Time | makespan · machines - total work |
//! | Avg Utilization | Mean machine busyness |
//! | Avg Flow Time | Mean job completion time |
//!
//! # Reference
//! Pinedo (2016), "Scheduling", Ch. 1.2: Performance Measures

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::{Instance, Solution};

/// Schedule performance indicators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleKpi {
    /// Latest completion time.
    pub makespan: i64,
    /// Trivial lower bound on any feasible makespan.
    pub lower_bound: i64,
    /// Relative distance from the lower bound (0.0 = provably optimal).
    pub gap: f64,
    /// Total machine idle time within the makespan.
    pub total_idle_time: i64,
    /// Average machine utilization (0.0..1.0).
    pub avg_utilization: f64,
    /// Per-machine utilization.
    pub utilization_by_machine: BTreeMap<usize, f64>,
    /// Mean job completion time.
    pub avg_flow_time: f64,
}

impl ScheduleKpi {
    /// Computes KPIs for a solution of `instance`.
    pub fn calculate(instance: &Instance, solution: &Solution) -> Self {
        let makespan = solution.makespan;
        let lower_bound = instance.lower_bound();
        let gap = if lower_bound > 0 {
            (makespan - lower_bound) as f64 / lower_bound as f64
        } else {
            0.0
        };

        let busy = solution.schedule.machine_busy_times();
        let utilization_by_machine: BTreeMap<usize, f64> = if makespan > 0 {
            (0..instance.num_machines)
                .map(|m| {
                    let b = busy.get(&m).copied().unwrap_or(0);
                    (m, b as f64 / makespan as f64)
                })
                .collect()
        } else {
            BTreeMap::new()
        };
        let avg_utilization = if utilization_by_machine.is_empty() {
            0.0
        } else {
            utilization_by_machine.values().sum::<f64>() / utilization_by_machine.len() as f64
        };

        let total_busy: i64 = busy.values().sum();
        let total_idle_time = makespan * instance.num_machines as i64 - total_busy;

        let completions: Vec<i64> = (0..solution.num_jobs)
            .filter_map(|j| solution.schedule.job_completion_time(j))
            .collect();
        let avg_flow_time = if completions.is_empty() {
            0.0
        } else {
            completions.iter().sum::<i64>() as f64 / completions.len() as f64
        };

        Self {
            makespan,
            lower_bound,
            gap,
            total_idle_time,
            avg_utilization,
            utilization_by_machine,
            avg_flow_time,
        }
    }

    /// Whether the makespan equals the lower bound.
    pub fn is_provably_optimal(&self) -> bool {
        self.makespan == self.lower_bound
    }
}
