//! Operation references.

use serde::{Deserialize, Serialize};

use super::Instance;

/// Identifies one operation: operation `op` of job `job`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OperationRef {
    /// Job index.
    pub job: usize,
    /// Position within the job (0-indexed).
    pub op: usize,
}

impl OperationRef {
    /// Creates a reference.
    pub fn new(job: usize, op: usize) -> Self {
        Self { job, op }
    }
}

/// A schedulable operation together with the fields dispatching rules read.
///
/// Derived fields are copied out of the [`Instance`] when the ready set is
/// built; they are never stored elsewhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadyOperation {
    /// Which operation this is.
    pub operation: OperationRef,
    /// Machine the operation runs on.
    pub machine: usize,
    /// Processing time.
    pub duration: i64,
    /// Work left in the job including this operation.
    pub remaining_work: i64,
    /// Operations left in the job including this one.
    pub operations_remaining: usize,
}

impl ReadyOperation {
    /// Builds the ready entry for `(job, op)` with a precomputed remaining work.
    pub fn new(instance: &Instance, job: usize, op: usize, remaining_work: i64) -> Self {
        Self {
            operation: OperationRef::new(job, op),
            machine: instance.machine(job, op),
            duration: instance.duration(job, op),
            remaining_work,
            operations_remaining: instance.operations_remaining(op),
        }
    }

    /// Builds the ready entry for `(job, op)`, summing the remaining work.
    pub fn from_instance(instance: &Instance, job: usize, op: usize) -> Self {
        Self::new(instance, job, op, instance.remaining_work(job, op))
    }

    /// Job index.
    #[inline]
    pub fn job(&self) -> usize {
        self.operation.job
    }
}
