//! Ready set: the operations eligible at one simulation step.
//!
//! Holds at most one operation per job (that job's next unscheduled
//! operation), always enumerated in ascending job id. Selection takes the
//! minimum score with the first-enumerated entry winning exact ties, so a
//! tie always resolves to the lower job id.
//!
//! # Reference
//! Haupt (1989), "A Survey of Priority Rule-Based Scheduling"

use super::{DispatchRule, RuleScore, SchedulingContext};
use crate::models::{Instance, ReadyOperation};

/// Reusable ready-set buffer for one simulation run.
#[derive(Debug, Clone, Default)]
pub struct ReadySet {
    ops: Vec<ReadyOperation>,
    scores: Vec<RuleScore>,
}

impl ReadySet {
    /// Creates an empty ready set sized for `num_jobs` entries.
    pub fn with_capacity(num_jobs: usize) -> Self {
        Self {
            ops: Vec::with_capacity(num_jobs),
            scores: Vec::with_capacity(num_jobs),
        }
    }

    /// Refills the set from the per-job next-operation cursors.
    ///
    /// `remaining_work` is the run's cached
    /// [`Instance::remaining_work_table`].
    pub fn rebuild(&mut self, instance: &Instance, next_op: &[usize], remaining_work: &[Vec<i64>]) {
        self.ops.clear();
        self.scores.clear();
        for (job, &op) in next_op.iter().enumerate() {
            if op < instance.num_machines {
                self.ops
                    .push(ReadyOperation::new(instance, job, op, remaining_work[job][op]));
            }
        }
    }

    /// Scores every entry under `rule`, in enumeration order.
    pub fn score(&mut self, rule: DispatchRule, context: &mut SchedulingContext) {
        self.scores.clear();
        for op in &self.ops {
            self.scores.push(rule.evaluate(op, context));
        }
    }

    /// The highest-priority entry (lowest score), first-found on ties.
    ///
    /// Returns `None` if the set is empty or has not been scored.
    pub fn select_best(&self) -> Option<(&ReadyOperation, RuleScore)> {
        if self.scores.len() != self.ops.len() {
            return None;
        }
        select_best(&self.scores).map(|i| (&self.ops[i], self.scores[i]))
    }

    /// Entries in ascending job id.
    pub fn operations(&self) -> &[ReadyOperation] {
        &self.ops
    }

    /// Scores from the last [`ReadySet::score`] call.
    pub fn scores(&self) -> &[RuleScore] {
        &self.scores
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// Whether no job has an operation left.
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }
}

/// Index of the minimum score; the earliest index wins exact ties.
pub fn select_best(scores: &[RuleScore]) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (i, &s) in scores.iter().enumerate() {
        match best {
            Some(b) if s >= scores[b] => {}
            _ => best = Some(i),
        }
    }
    best
}
