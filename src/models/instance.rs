//! Job-shop instance model.
//!
//! An instance is a fixed set of jobs, each an ordered chain of operations.
//! Every job visits every machine exactly once, so the number of operations
//! per job equals the number of machines.
//!
//! # Reference
//! Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 7 (Job Shops)

use serde::{Deserialize, Serialize};

/// An immutable job-shop problem description.
///
/// `machines[j][o]` is the machine that runs operation `o` of job `j`,
/// `durations[j][o]` its processing time. Operation `o` of a job can never
/// start before operation `o - 1` of the same job has finished.
///
/// The fields are public for construction and deserialization; the solver
/// entry points validate the instance before touching it
/// (see [`crate::validation::validate_instance`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instance {
    /// Number of jobs (J).
    pub num_jobs: usize,
    /// Number of machines (M), also the operation count of every job.
    pub num_machines: usize,
    /// Machine assignment per (job, operation).
    pub machines: Vec<Vec<usize>>,
    /// Processing time per (job, operation).
    pub durations: Vec<Vec<i64>>,
}

impl Instance {
    /// Creates an instance from per-job machine and duration rows.
    ///
    /// Dimensions are taken from the row counts; nothing is validated here.
    pub fn new(machines: Vec<Vec<usize>>, durations: Vec<Vec<i64>>) -> Self {
        let num_jobs = machines.len();
        let num_machines = machines.first().map_or(0, Vec::len);
        Self {
            num_jobs,
            num_machines,
            machines,
            durations,
        }
    }

    /// Creates an instance from per-job `(machine, duration)` pairs.
    pub fn from_jobs(jobs: Vec<Vec<(usize, i64)>>) -> Self {
        let (machines, durations) = jobs
            .into_iter()
            .map(|ops| ops.into_iter().unzip::<_, _, Vec<_>, Vec<_>>())
            .unzip();
        Self::new(machines, durations)
    }

    /// Machine of operation `op` of `job`.
    #[inline]
    pub fn machine(&self, job: usize, op: usize) -> usize {
        self.machines[job][op]
    }

    /// Duration of operation `op` of `job`.
    #[inline]
    pub fn duration(&self, job: usize, op: usize) -> i64 {
        self.durations[job][op]
    }

    /// Total number of operations (J·M).
    pub fn operation_count(&self) -> usize {
        self.num_jobs * self.num_machines
    }

    /// Sum of durations of operation `op` and all later operations of `job`.
    pub fn remaining_work(&self, job: usize, op: usize) -> i64 {
        self.durations[job][op..].iter().sum()
    }

    /// Operations left in `job` when `op` is next, counting `op` itself.
    #[inline]
    pub fn operations_remaining(&self, op: usize) -> usize {
        self.num_machines - op
    }

    /// Total processing time of a job.
    pub fn job_duration(&self, job: usize) -> i64 {
        self.durations[job].iter().sum()
    }

    /// Total processing time assigned to a machine across all jobs.
    pub fn machine_load(&self, machine: usize) -> i64 {
        self.machines
            .iter()
            .zip(&self.durations)
            .flat_map(|(ms, ds)| ms.iter().zip(ds))
            .filter(|&(&m, _)| m == machine)
            .map(|(_, &d)| d)
            .sum()
    }

    /// Sum of all processing times.
    pub fn total_work(&self) -> i64 {
        self.durations.iter().flatten().sum()
    }

    /// Remaining-work table: `table[j][o] == remaining_work(j, o)`.
    ///
    /// Computed once per simulation pass as suffix sums.
    pub fn remaining_work_table(&self) -> Vec<Vec<i64>> {
        self.durations
            .iter()
            .map(|row| {
                let mut suffix = vec![0; row.len()];
                let mut acc = 0;
                for (o, &d) in row.iter().enumerate().rev() {
                    acc += d;
                    suffix[o] = acc;
                }
                suffix
            })
            .collect()
    }

    /// Trivial makespan lower bound: the larger of the busiest machine's load
    /// and the longest job.
    pub fn lower_bound(&self) -> i64 {
        let machine_bound = (0..self.num_machines)
            .map(|m| self.machine_load(m))
            .max()
            .unwrap_or(0);
        let job_bound = (0..self.num_jobs)
            .map(|j| self.job_duration(j))
            .max()
            .unwrap_or(0);
        machine_bound.max(job_bound)
    }

    /// Renders the instance in the plain-text instance format.
    pub fn to_text(&self) -> String {
        let mut out = format!("{} {}\n", self.num_jobs, self.num_machines);
        for (ms, ds) in self.machines.iter().zip(&self.durations) {
            let line = ms
                .iter()
                .zip(ds)
                .map(|(m, d)| format!("{m} {d}"))
                .collect::<Vec<_>>()
                .join(" ");
            out.push_str(&line);
            out.push('\n');
        }
        out
    }
}
