//! Input validation and schedule verification.
//!
//! [`validate_instance`] checks the structural preconditions the simulator
//! relies on before any scheduling happens. Detects:
//! - Empty instances (no jobs or no machines)
//! - Instances beyond the configured size limits
//! - Job rows with the wrong number of operations
//! - Machine ids out of range, or repeated within one job
//! - Negative durations
//! - Durations whose total would overflow schedule times
//!
//! [`verify_schedule`] checks a finished schedule for feasibility: every
//! operation present, job precedence respected, and no two operations
//! overlapping on one machine.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::InstanceLimits;
use crate::models::{Instance, OperationRef, Schedule, ScheduledOperation, Violation, ViolationType};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationErrorKind {
    /// No jobs or no machines.
    EmptyInstance,
    /// More jobs or machines than the limits allow.
    TooLarge,
    /// Row count or row length disagrees with the declared dimensions.
    DimensionMismatch,
    /// A machine id is not below `num_machines`.
    MachineOutOfRange,
    /// A job visits the same machine twice.
    DuplicateMachine,
    /// A processing time is negative.
    NegativeDuration,
    /// Total processing time too large to represent schedule times.
    DurationOutOfRange,
}

impl ValidationError {
    /// Creates a validation error.
    pub fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Validates an instance against the given limits.
///
/// Checks:
/// 1. At least one job and one machine
/// 2. Job and machine counts within `limits`
/// 3. One machine row and one duration row per job, each `num_machines` long
/// 4. Every machine id in `0..num_machines`, none repeated within a job
/// 5. No negative durations
/// 6. Total work times `num_machines` fits in `i64`, which bounds every
///    start, end, load and idle time a schedule can produce
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_instance(instance: &Instance, limits: &InstanceLimits) -> ValidationResult {
    let mut errors = Vec::new();
    let (jobs, machines) = (instance.num_jobs, instance.num_machines);

    if jobs == 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptyInstance,
            "Instance has no jobs",
        ));
    }
    if machines == 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptyInstance,
            "Instance has no machines",
        ));
    }
    if jobs > limits.max_jobs {
        errors.push(ValidationError::new(
            ValidationErrorKind::TooLarge,
            format!("Instance has {jobs} jobs (limit {})", limits.max_jobs),
        ));
    }
    if machines > limits.max_machines {
        errors.push(ValidationError::new(
            ValidationErrorKind::TooLarge,
            format!("Instance has {machines} machines (limit {})", limits.max_machines),
        ));
    }
    if !errors.is_empty() {
        return Err(errors);
    }

    if instance.machines.len() != jobs || instance.durations.len() != jobs {
        errors.push(ValidationError::new(
            ValidationErrorKind::DimensionMismatch,
            format!(
                "Expected {jobs} job rows, found {} machine rows and {} duration rows",
                instance.machines.len(),
                instance.durations.len()
            ),
        ));
    }

    let mut seen = vec![false; machines];
    let mut total_work: Option<i64> = Some(0);
    for (job, (ms, ds)) in instance
        .machines
        .iter()
        .zip(&instance.durations)
        .enumerate()
    {
        if ms.len() != machines || ds.len() != machines {
            errors.push(ValidationError::new(
                ValidationErrorKind::DimensionMismatch,
                format!(
                    "Job {job} has {} machines and {} durations, expected {machines}",
                    ms.len(),
                    ds.len()
                ),
            ));
            continue;
        }

        seen.iter_mut().for_each(|s| *s = false);
        for (op, (&m, &d)) in ms.iter().zip(ds).enumerate() {
            if m >= machines {
                errors.push(ValidationError::new(
                    ValidationErrorKind::MachineOutOfRange,
                    format!("Job {job} operation {op} uses machine {m} (machines: {machines})"),
                ));
            } else if seen[m] {
                errors.push(ValidationError::new(
                    ValidationErrorKind::DuplicateMachine,
                    format!("Job {job} visits machine {m} more than once"),
                ));
            } else {
                seen[m] = true;
            }
            total_work = total_work.and_then(|t| t.checked_add(d.max(0)));
            if d < 0 {
                errors.push(ValidationError::new(
                    ValidationErrorKind::NegativeDuration,
                    format!("Job {job} operation {op} has negative duration {d}"),
                ));
            }
        }
    }

    if total_work
        .and_then(|t| t.checked_mul(machines as i64))
        .is_none()
    {
        errors.push(ValidationError::new(
            ValidationErrorKind::DurationOutOfRange,
            format!("Total processing time over {machines} machines overflows i64"),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Verifies that a schedule is a feasible solution of `instance`.
///
/// Returns every violation found; an empty vector means the schedule is
/// complete and feasible.
pub fn verify_schedule(instance: &Instance, schedule: &Schedule) -> Vec<Violation> {
    let mut violations = Vec::new();

    for job in 0..instance.num_jobs {
        let mut prev_end: Option<i64> = None;
        for op in 0..instance.num_machines {
            let r = OperationRef::new(job, op);
            let Some(entry) = schedule.get(r) else {
                violations.push(Violation::new(
                    ViolationType::MissingOperation,
                    r,
                    format!("Job {job} operation {op} is not scheduled"),
                ));
                prev_end = None;
                continue;
            };

            let expected_machine = instance.machine(job, op);
            if entry.machine != expected_machine {
                violations.push(Violation::new(
                    ViolationType::MachineMismatch,
                    r,
                    format!(
                        "Job {job} operation {op} on machine {}, expected {expected_machine}",
                        entry.machine
                    ),
                ));
            }

            let expected_duration = instance.duration(job, op);
            if entry.duration() != expected_duration {
                violations.push(Violation::new(
                    ViolationType::DurationMismatch,
                    r,
                    format!(
                        "Job {job} operation {op} lasts {}, expected {expected_duration}",
                        entry.duration()
                    ),
                ));
            }

            if let Some(end) = prev_end {
                if entry.start < end {
                    violations.push(Violation::new(
                        ViolationType::PrecedenceViolation,
                        r,
                        format!(
                            "Job {job} operation {op} starts at {} before its predecessor ends at {end}",
                            entry.start
                        ),
                    ));
                }
            }
            prev_end = Some(entry.end);
        }
    }

    for machine in 0..instance.num_machines {
        let ops = schedule.operations_on_machine(machine);
        let mut latest: Option<(OperationRef, ScheduledOperation)> = None;
        for (r, entry) in ops {
            if let Some((other_ref, other)) = latest {
                if entry.overlaps(&other) {
                    violations.push(Violation::new(
                        ViolationType::MachineOverlap,
                        r,
                        format!(
                            "Job {} operation {} overlaps job {} operation {} on machine {machine}",
                            r.job, r.op, other_ref.job, other_ref.op
                        ),
                    ));
                }
            }
            if latest.map_or(true, |(_, other)| entry.end > other.end) {
                latest = Some((r, entry));
            }
        }
    }

    violations
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_instance() -> Instance {
        Instance::from_jobs(vec![vec![(0, 1), (1, 2)], vec![(1, 2), (0, 1)]])
    }

    fn feasible_schedule() -> Schedule {
        let mut s = Schedule::with_capacity(2, 2);
        s.push(0, ScheduledOperation::new(0, 0, 1));
        s.push(0, ScheduledOperation::new(1, 2, 4));
        s.push(1, ScheduledOperation::new(1, 0, 2));
        s.push(1, ScheduledOperation::new(0, 2, 3));
        s
    }

    fn kinds(result: ValidationResult) -> Vec<ValidationErrorKind> {
        result.unwrap_err().into_iter().map(|e| e.kind).collect()
    }

    #[test]
    fn test_valid_instance() {
        assert!(validate_instance(&sample_instance(), &InstanceLimits::default()).is_ok());
    }

    #[test]
    fn test_empty_instance() {
        let inst = Instance::new(Vec::new(), Vec::new());
        let errors = kinds(validate_instance(&inst, &InstanceLimits::default()));
        assert_eq!(
            errors,
            vec![ValidationErrorKind::EmptyInstance, ValidationErrorKind::EmptyInstance]
        );
    }

    #[test]
    fn test_too_large_rejected() {
        let inst = sample_instance();
        let errors = kinds(validate_instance(&inst, &InstanceLimits::new(1, 1)));
        assert_eq!(errors.len(), 2);
        assert!(errors.iter().all(|k| *k == ValidationErrorKind::TooLarge));
    }

    #[test]
    fn test_row_length_mismatch() {
        let mut inst = sample_instance();
        inst.durations[1].pop();
        let errors = kinds(validate_instance(&inst, &InstanceLimits::default()));
        assert_eq!(errors, vec![ValidationErrorKind::DimensionMismatch]);
    }

    #[test]
    fn test_missing_job_row() {
        let mut inst = sample_instance();
        inst.num_jobs = 3;
        let errors = kinds(validate_instance(&inst, &InstanceLimits::default()));
        assert!(errors.contains(&ValidationErrorKind::DimensionMismatch));
    }

    #[test]
    fn test_machine_out_of_range_and_duplicate() {
        let inst = Instance::from_jobs(vec![vec![(0, 1), (2, 2)], vec![(1, 2), (1, 1)]]);
        let errors = kinds(validate_instance(&inst, &InstanceLimits::default()));
        assert!(errors.contains(&ValidationErrorKind::MachineOutOfRange));
        assert!(errors.contains(&ValidationErrorKind::DuplicateMachine));
    }

    #[test]
    fn test_negative_duration() {
        let inst = Instance::from_jobs(vec![vec![(0, -1), (1, 2)]]);
        let errors = kinds(validate_instance(&inst, &InstanceLimits::default()));
        assert_eq!(errors, vec![ValidationErrorKind::NegativeDuration]);
    }

    #[test]
    fn test_overflowing_durations_rejected() {
        let inst = Instance::from_jobs(vec![vec![(0, i64::MAX)], vec![(0, 1)]]);
        let errors = kinds(validate_instance(&inst, &InstanceLimits::default()));
        assert_eq!(errors, vec![ValidationErrorKind::DurationOutOfRange]);

        // Fits as a sum, but not once scaled by the machine count
        let half = i64::MAX / 2 + 1;
        let inst = Instance::from_jobs(vec![vec![(0, half), (1, 0)]]);
        let errors = kinds(validate_instance(&inst, &InstanceLimits::default()));
        assert_eq!(errors, vec![ValidationErrorKind::DurationOutOfRange]);

        let inst = Instance::from_jobs(vec![vec![(0, i64::MAX / 2), (1, 0)]]);
        assert!(validate_instance(&inst, &InstanceLimits::default()).is_ok());
    }

    #[test]
    fn test_zero_duration_allowed() {
        let inst = Instance::from_jobs(vec![vec![(0, 0), (1, 0)]]);
        assert!(validate_instance(&inst, &InstanceLimits::default()).is_ok());
    }

    #[test]
    fn test_feasible_schedule_verifies() {
        assert!(verify_schedule(&sample_instance(), &feasible_schedule()).is_empty());
    }

    #[test]
    fn test_precedence_violation() {
        let mut s = feasible_schedule();
        s.jobs[1][1] = ScheduledOperation::new(0, 1, 2);
        let v = verify_schedule(&sample_instance(), &s);
        assert_eq!(v.len(), 1);
        assert_eq!(v[0].violation_type, ViolationType::PrecedenceViolation);
        assert_eq!(v[0].operation, OperationRef::new(1, 1));
    }

    #[test]
    fn test_machine_overlap() {
        let mut s = feasible_schedule();
        // Job 0's second op moved onto [1, 3) overlaps job 1's first op on M1
        s.jobs[0][1] = ScheduledOperation::new(1, 1, 3);
        let v = verify_schedule(&sample_instance(), &s);
        assert!(v.iter().any(|x| x.violation_type == ViolationType::MachineOverlap));
    }

    #[test]
    fn test_missing_and_mismatched_entries() {
        let mut s = feasible_schedule();
        s.jobs[1].pop();
        s.jobs[0][0] = ScheduledOperation::new(1, 0, 3);
        let v: Vec<ViolationType> = verify_schedule(&sample_instance(), &s)
            .into_iter()
            .map(|x| x.violation_type)
            .collect();
        assert!(v.contains(&ViolationType::MissingOperation));
        assert!(v.contains(&ViolationType::MachineMismatch));
        assert!(v.contains(&ViolationType::DurationMismatch));
    }
}
