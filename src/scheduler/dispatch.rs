//! Dispatch-rule list scheduling.
//!
//! # Algorithm
//!
//! Repeated until every operation is committed:
//! 1. Build the ready set: each unfinished job's next operation, in
//!    ascending job id.
//! 2. Score every ready operation under the active rule.
//! 3. Take the lowest score; an exact tie goes to the lower job id.
//! 4. Start it at `max(machine available, job available)` and advance both
//!    to its end time.
//!
//! Decisions are never revisited, so the result is feasible but not
//! optimal.
//!
//! # Complexity
//! O(J²·M): J·M steps, each scanning at most J ready operations.
//!
//! # Reference
//! Pinedo (2016), "Scheduling", Ch. 7.5: Dispatching Rules in Job Shops

use crate::config::InstanceLimits;
use crate::dispatching::{DispatchRule, ReadySet, SchedulingContext};
use crate::error::{Result, SchedulingError};
use crate::logging::VERBOSITY_SILENT;
use crate::models::{Instance, Schedule, ScheduledOperation, Solution};
use crate::validation::validate_instance;
use crate::{log_debug, log_decisions};

/// Runs one dispatching-rule simulation on a validated instance.
///
/// `seed` only affects [`DispatchRule::Random`]; the other rules are
/// deterministic functions of the instance.
///
/// # Errors
/// [`SchedulingError::InvalidInstance`] if the instance fails
/// [`validate_instance`] with default limits.
///
/// # Example
///
/// ```
/// use u_jobshop::dispatching::DispatchRule;
/// use u_jobshop::models::Instance;
/// use u_jobshop::scheduler::simulate;
///
/// let instance = Instance::from_jobs(vec![vec![(0, 5)]]);
/// let solution = simulate(&instance, DispatchRule::Spt, 0).unwrap();
/// assert_eq!(solution.makespan, 5);
/// ```
pub fn simulate(instance: &Instance, rule: DispatchRule, seed: u64) -> Result<Solution> {
    DispatchSimulator::new(instance).run(rule, seed)
}

/// Greedy dispatching simulator bound to one instance.
///
/// Holds no per-run state: every [`DispatchSimulator::run`] allocates its
/// own availability arrays and schedule, so one simulator can be shared
/// across threads.
#[derive(Debug, Clone)]
pub struct DispatchSimulator<'a> {
    instance: &'a Instance,
    limits: InstanceLimits,
    verbosity: u8,
}

/// Mutable state of a single run.
struct RunState {
    machine_available: Vec<i64>,
    job_available: Vec<i64>,
    next_op: Vec<usize>,
    schedule: Schedule,
}

impl RunState {
    fn new(instance: &Instance) -> Self {
        Self {
            machine_available: vec![0; instance.num_machines],
            job_available: vec![0; instance.num_jobs],
            next_op: vec![0; instance.num_jobs],
            schedule: Schedule::with_capacity(instance.num_jobs, instance.num_machines),
        }
    }
}

impl<'a> DispatchSimulator<'a> {
    /// Creates a simulator with default limits and no logging.
    pub fn new(instance: &'a Instance) -> Self {
        Self {
            instance,
            limits: InstanceLimits::default(),
            verbosity: VERBOSITY_SILENT,
        }
    }

    /// Sets the limits used when validating the instance.
    pub fn with_limits(mut self, limits: InstanceLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Sets the logging verbosity.
    pub fn with_verbosity(mut self, verbosity: u8) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Validates the instance, then simulates `rule`.
    pub fn run(&self, rule: DispatchRule, seed: u64) -> Result<Solution> {
        validate_instance(self.instance, &self.limits).map_err(SchedulingError::InvalidInstance)?;
        Ok(self.run_validated(rule, seed))
    }

    /// Simulates `rule` on an instance the caller has already validated.
    ///
    /// # Panics
    /// If the ready set empties while operations remain, which means the
    /// instance violated its dimensions.
    pub(crate) fn run_validated(&self, rule: DispatchRule, seed: u64) -> Solution {
        let instance = self.instance;
        let remaining_work = instance.remaining_work_table();
        let mut state = RunState::new(instance);
        let mut ready = ReadySet::with_capacity(instance.num_jobs);
        let mut context = SchedulingContext::new(seed);
        let total = instance.operation_count();

        while context.step < total {
            ready.rebuild(instance, &state.next_op, &remaining_work);
            ready.score(rule, &mut context);

            if self.verbosity >= crate::logging::VERBOSITY_DEBUG {
                for (op, score) in ready.operations().iter().zip(ready.scores()) {
                    log_debug!(
                        self.verbosity,
                        "  [{rule}] step {}: J{} O{} M{} d={} score={score}",
                        context.step,
                        op.operation.job,
                        op.operation.op,
                        op.machine,
                        op.duration
                    );
                }
            }

            let Some((best, _)) = ready.select_best() else {
                unreachable!(
                    "ready set empty with {} of {total} operations left",
                    total - context.step
                );
            };
            let (job, machine) = (best.job(), best.machine);

            let start = state.machine_available[machine].max(state.job_available[job]);
            let end = start + best.duration;
            state.schedule.push(job, ScheduledOperation::new(machine, start, end));
            state.machine_available[machine] = end;
            state.job_available[job] = end;
            state.next_op[job] += 1;
            context.advance();

            log_decisions!(
                self.verbosity,
                "[{rule}] J{job} O{} on M{machine}: [{start}, {end})",
                best.operation.op
            );
        }

        Solution::new(instance.num_jobs, instance.num_machines, state.schedule, rule)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::OperationRef;
    use crate::validation::verify_schedule;
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    fn two_by_two() -> Instance {
        Instance::new(vec![vec![0, 1], vec![1, 0]], vec![vec![1, 2], vec![2, 1]])
    }

    fn random_instance(jobs: usize, machines: usize, seed: u64) -> Instance {
        let mut rng = SmallRng::seed_from_u64(seed);
        let rows = (0..jobs)
            .map(|_| {
                let mut order: Vec<usize> = (0..machines).collect();
                for i in (1..machines).rev() {
                    order.swap(i, rng.random_range(0..=i));
                }
                order
                    .into_iter()
                    .map(|m| (m, rng.random_range(1..=20)))
                    .collect()
            })
            .collect();
        Instance::from_jobs(rows)
    }

    fn entry(sol: &Solution, job: usize, op: usize) -> (usize, i64, i64) {
        let e = sol.schedule.get(OperationRef::new(job, op)).unwrap();
        (e.machine, e.start, e.end)
    }

    #[test]
    fn test_two_by_two_spt() {
        let sol = simulate(&two_by_two(), DispatchRule::Spt, 0).unwrap();
        // Step 2 ties at duration 2 between J0 O1 and J1 O0 → J0 first
        assert_eq!(entry(&sol, 0, 0), (0, 0, 1));
        assert_eq!(entry(&sol, 0, 1), (1, 1, 3));
        assert_eq!(entry(&sol, 1, 0), (1, 3, 5));
        assert_eq!(entry(&sol, 1, 1), (0, 5, 6));
        assert_eq!(sol.makespan, 6);
        assert_eq!(sol.rule, DispatchRule::Spt);
    }

    #[test]
    fn test_two_by_two_lpt() {
        let sol = simulate(&two_by_two(), DispatchRule::Lpt, 0).unwrap();
        assert_eq!(entry(&sol, 1, 0), (1, 0, 2));
        assert_eq!(entry(&sol, 0, 0), (0, 0, 1));
        // Waits for M1 (free at 2) although the job is ready at 1
        assert_eq!(entry(&sol, 0, 1), (1, 2, 4));
        assert_eq!(entry(&sol, 1, 1), (0, 2, 3));
        assert_eq!(sol.makespan, 4);
    }

    #[test]
    fn test_two_by_two_all_rules() {
        let expected = [
            (DispatchRule::Spt, 6),
            (DispatchRule::Lpt, 4),
            (DispatchRule::Srt, 6),
            (DispatchRule::Mwr, 4),
            (DispatchRule::Fifo, 6),
            (DispatchRule::Mor, 4),
        ];
        for (rule, makespan) in expected {
            let sol = simulate(&two_by_two(), rule, 0).unwrap();
            assert_eq!(sol.makespan, makespan, "rule {rule}");
        }
    }

    #[test]
    fn test_single_operation_any_rule() {
        let inst = Instance::from_jobs(vec![vec![(0, 5)]]);
        for rule in DispatchRule::ALL {
            let sol = simulate(&inst, rule, 123).unwrap();
            assert_eq!(sol.makespan, 5);
            assert_eq!(entry(&sol, 0, 0), (0, 0, 5));
        }
    }

    #[test]
    fn test_fifo_runs_jobs_in_order() {
        // Identical jobs: FIFO finishes job 0 completely before job 1 starts
        // on any machine job 0 still needs.
        let inst = Instance::from_jobs(vec![vec![(0, 2), (1, 2)], vec![(0, 2), (1, 2)]]);
        let sol = simulate(&inst, DispatchRule::Fifo, 0).unwrap();
        assert_eq!(entry(&sol, 0, 0), (0, 0, 2));
        assert_eq!(entry(&sol, 0, 1), (1, 2, 4));
        assert_eq!(entry(&sol, 1, 0), (0, 2, 4));
        assert_eq!(entry(&sol, 1, 1), (1, 4, 6));
    }

    #[test]
    fn test_tie_goes_to_lower_job() {
        // Three jobs with identical first operations on M0: under every
        // deterministic rule they tie, so M0 serves them in job order.
        let inst = Instance::from_jobs(vec![
            vec![(0, 3), (1, 1)],
            vec![(0, 3), (1, 1)],
            vec![(0, 3), (1, 1)],
        ]);
        for rule in [DispatchRule::Spt, DispatchRule::Lpt, DispatchRule::Srt, DispatchRule::Mwr, DispatchRule::Mor] {
            let sol = simulate(&inst, rule, 0).unwrap();
            let starts: Vec<i64> = (0..3).map(|j| entry(&sol, j, 0).1).collect();
            assert_eq!(starts, vec![0, 3, 6], "rule {rule}");
        }
    }

    #[test]
    fn test_feasible_and_makespan_consistent() {
        for seed in 0..20 {
            let inst = random_instance(6, 4, seed);
            for rule in DispatchRule::ALL {
                let sol = simulate(&inst, rule, seed).unwrap();
                assert!(verify_schedule(&inst, &sol.schedule).is_empty(), "rule {rule} seed {seed}");
                assert_eq!(sol.makespan, sol.schedule.max_end_time());
                assert_eq!(sol.schedule.operation_count(), inst.operation_count());
                assert!(sol.makespan >= inst.lower_bound());
            }
        }
    }

    #[test]
    fn test_deterministic_repeat() {
        let inst = random_instance(8, 5, 3);
        for rule in DispatchRule::ALL {
            let a = simulate(&inst, rule, 77).unwrap();
            let b = simulate(&inst, rule, 77).unwrap();
            assert_eq!(a, b);
        }
    }

    #[test]
    fn test_random_seed_changes_schedule() {
        let inst = random_instance(10, 5, 11);
        let schedules: Vec<Schedule> = (0..8)
            .map(|s| simulate(&inst, DispatchRule::Random, s).unwrap().schedule)
            .collect();
        assert!(schedules.iter().any(|s| *s != schedules[0]));
    }

    #[test]
    fn test_deterministic_rules_ignore_seed() {
        let inst = random_instance(7, 4, 5);
        for rule in DispatchRule::ALL.into_iter().filter(|r| r.is_deterministic()) {
            assert_eq!(simulate(&inst, rule, 1).unwrap(), simulate(&inst, rule, 2).unwrap());
        }
    }

    #[test]
    fn test_zero_duration_operations() {
        let inst = Instance::from_jobs(vec![vec![(0, 0), (1, 4)], vec![(1, 0), (0, 0)]]);
        let sol = simulate(&inst, DispatchRule::Spt, 0).unwrap();
        assert!(verify_schedule(&inst, &sol.schedule).is_empty());
        assert_eq!(sol.makespan, 4);
    }

    #[test]
    fn test_invalid_instance_rejected() {
        let inst = Instance::from_jobs(vec![vec![(3, 1)]]);
        let err = simulate(&inst, DispatchRule::Spt, 0).unwrap_err();
        assert!(matches!(err, SchedulingError::InvalidInstance(_)));
    }

    #[test]
    fn test_huge_durations_rejected_before_simulating() {
        let inst = Instance::from_jobs(vec![vec![(0, i64::MAX)], vec![(0, 1)]]);
        for rule in DispatchRule::ALL {
            let err = simulate(&inst, rule, 0).unwrap_err();
            assert!(matches!(err, SchedulingError::InvalidInstance(_)));
        }
    }

    #[test]
    fn test_largest_accepted_durations_do_not_overflow() {
        let big = i64::MAX / 8;
        let inst = Instance::from_jobs(vec![vec![(0, big), (1, 1)], vec![(1, big), (0, 1)]]);
        let sol = simulate(&inst, DispatchRule::Fifo, 0).unwrap();
        assert!(verify_schedule(&inst, &sol.schedule).is_empty());
        assert!(sol.makespan <= inst.total_work());
    }

    #[test]
    fn test_limits_respected() {
        let inst = random_instance(4, 3, 0);
        let err = DispatchSimulator::new(&inst)
            .with_limits(InstanceLimits::new(3, 3))
            .run(DispatchRule::Fifo, 0)
            .unwrap_err();
        assert!(matches!(err, SchedulingError::InvalidInstance(_)));
    }
}
