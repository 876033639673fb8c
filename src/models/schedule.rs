//! Schedule model.
//!
//! A schedule assigns every operation of an instance a machine and a
//! half-open time interval `[start, end)`. Feasibility problems found by
//! [`crate::validation::verify_schedule`] are reported as [`Violation`]s.
//!
//! # Reference
//! Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 3

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::OperationRef;

/// A complete or partial job-shop schedule.
///
/// `jobs[j][o]` is the entry for operation `o` of job `j`. Because a job's
/// operations are committed in order, a partial schedule is always a prefix
/// of each job's chain.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    /// Per-job operation entries, in operation order.
    pub jobs: Vec<Vec<ScheduledOperation>>,
}

/// One scheduled operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledOperation {
    /// Machine the operation runs on.
    pub machine: usize,
    /// Start time.
    pub start: i64,
    /// End time (start + duration).
    pub end: i64,
}

/// A feasibility violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Type of violation.
    pub violation_type: ViolationType,
    /// Operation the violation was found on.
    pub operation: OperationRef,
    /// Human-readable description.
    pub message: String,
}

/// Classification of schedule violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViolationType {
    /// Operation has no schedule entry.
    MissingOperation,
    /// Operation started before its job predecessor finished.
    PrecedenceViolation,
    /// Operation overlaps another operation on the same machine.
    MachineOverlap,
    /// Recorded machine differs from the instance.
    MachineMismatch,
    /// `end - start` differs from the instance duration.
    DurationMismatch,
}

impl ScheduledOperation {
    /// Creates an entry.
    pub fn new(machine: usize, start: i64, end: i64) -> Self {
        Self {
            machine,
            start,
            end,
        }
    }

    /// Processing duration.
    #[inline]
    pub fn duration(&self) -> i64 {
        self.end - self.start
    }

    /// Whether two half-open intervals intersect.
    #[inline]
    pub fn overlaps(&self, other: &ScheduledOperation) -> bool {
        self.start < other.end && other.start < self.end
    }
}

impl Violation {
    /// Creates a violation.
    pub fn new(
        violation_type: ViolationType,
        operation: OperationRef,
        message: impl Into<String>,
    ) -> Self {
        Self {
            violation_type,
            operation,
            message: message.into(),
        }
    }
}

impl Schedule {
    /// Creates an empty schedule with room for `num_jobs` jobs of
    /// `ops_per_job` operations.
    pub fn with_capacity(num_jobs: usize, ops_per_job: usize) -> Self {
        Self {
            jobs: (0..num_jobs)
                .map(|_| Vec::with_capacity(ops_per_job))
                .collect(),
        }
    }

    /// Appends the next operation of `job`.
    pub fn push(&mut self, job: usize, entry: ScheduledOperation) {
        self.jobs[job].push(entry);
    }

    /// Entry for an operation, if scheduled.
    pub fn get(&self, operation: OperationRef) -> Option<&ScheduledOperation> {
        self.jobs.get(operation.job)?.get(operation.op)
    }

    /// Number of scheduled operations.
    pub fn operation_count(&self) -> usize {
        self.jobs.iter().map(Vec::len).sum()
    }

    /// Completion time of a job: end of its last scheduled operation.
    pub fn job_completion_time(&self, job: usize) -> Option<i64> {
        self.jobs.get(job)?.last().map(|e| e.end)
    }

    /// Makespan: latest job completion time.
    pub fn makespan(&self) -> i64 {
        (0..self.jobs.len())
            .filter_map(|j| self.job_completion_time(j))
            .max()
            .unwrap_or(0)
    }

    /// Latest end time across every entry.
    ///
    /// Equals [`Schedule::makespan`] for any schedule that respects job
    /// precedence.
    pub fn max_end_time(&self) -> i64 {
        self.jobs.iter().flatten().map(|e| e.end).max().unwrap_or(0)
    }

    /// Start times per job, in operation order.
    pub fn start_times(&self) -> Vec<Vec<i64>> {
        self.jobs
            .iter()
            .map(|ops| ops.iter().map(|e| e.start).collect())
            .collect()
    }

    /// All operations on `machine`, sorted by start time.
    pub fn operations_on_machine(&self, machine: usize) -> Vec<(OperationRef, ScheduledOperation)> {
        let mut ops: Vec<_> = self
            .jobs
            .iter()
            .enumerate()
            .flat_map(|(j, row)| {
                row.iter()
                    .enumerate()
                    .map(move |(o, e)| (OperationRef::new(j, o), *e))
            })
            .filter(|(_, e)| e.machine == machine)
            .collect();
        ops.sort_by_key(|(r, e)| (e.start, *r));
        ops
    }

    /// Busy time per machine that has at least one operation.
    pub fn machine_busy_times(&self) -> BTreeMap<usize, i64> {
        let mut busy = BTreeMap::new();
        for e in self.jobs.iter().flatten() {
            *busy.entry(e.machine).or_insert(0) += e.duration();
        }
        busy
    }

    /// Machine utilization: busy time / horizon.
    ///
    /// Returns `None` if `horizon` is not positive.
    pub fn machine_utilization(&self, machine: usize, horizon: i64) -> Option<f64> {
        if horizon <= 0 {
            return None;
        }
        let busy = self.machine_busy_times().get(&machine).copied().unwrap_or(0);
        Some(busy as f64 / horizon as f64)
    }
}
