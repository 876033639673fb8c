//! Instance text reader.
//!
//! Format: a header line `<num_jobs> <num_machines>`, then one line per job
//! listing `num_machines` pairs of `<machine> <time>`. Blank lines and lines
//! starting with `#` are skipped.

use std::fs;
use std::path::Path;

use crate::config::InstanceLimits;
use crate::error::{Result, SchedulingError};
use crate::models::Instance;
use crate::validation::validate_instance;

/// Parses an instance with default limits.
pub fn parse_instance(text: &str) -> Result<Instance> {
    parse_instance_with_limits(text, &InstanceLimits::default())
}

/// Reads and parses an instance file with default limits.
pub fn read_instance(path: impl AsRef<Path>) -> Result<Instance> {
    let text = fs::read_to_string(path)?;
    parse_instance(&text)
}

/// Parses an instance, rejecting anything beyond `limits`.
///
/// The result has passed [`validate_instance`].
pub fn parse_instance_with_limits(text: &str, limits: &InstanceLimits) -> Result<Instance> {
    let mut lines = text
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'));

    let (header_line, header) = lines
        .next()
        .ok_or_else(|| SchedulingError::parse(1, "missing header line"))?;
    let (num_jobs, num_machines) = parse_header(header_line, header)?;

    if num_jobs == 0 || num_machines == 0 {
        return Err(SchedulingError::parse(
            header_line,
            format!("invalid number of jobs ({num_jobs}) or machines ({num_machines})"),
        ));
    }
    if num_jobs > limits.max_jobs || num_machines > limits.max_machines {
        return Err(SchedulingError::parse(
            header_line,
            format!(
                "{num_jobs} jobs x {num_machines} machines exceeds limit of {} x {}",
                limits.max_jobs, limits.max_machines
            ),
        ));
    }

    let mut machines = Vec::with_capacity(num_jobs);
    let mut durations = Vec::with_capacity(num_jobs);
    let mut last_line = header_line;
    for job in 0..num_jobs {
        let (line_no, line) = lines.next().ok_or_else(|| {
            SchedulingError::parse(last_line, format!("unexpected end of input at job {job}"))
        })?;
        let (ms, ds) = parse_job(line_no, line, job, num_machines)?;
        machines.push(ms);
        durations.push(ds);
        last_line = line_no;
    }

    if let Some((line_no, _)) = lines.next() {
        return Err(SchedulingError::parse(
            line_no,
            format!("unexpected content after {num_jobs} jobs"),
        ));
    }

    let instance = Instance {
        num_jobs,
        num_machines,
        machines,
        durations,
    };
    validate_instance(&instance, limits).map_err(SchedulingError::InvalidInstance)?;
    Ok(instance)
}

fn parse_header(line_no: usize, line: &str) -> Result<(usize, usize)> {
    let mut tokens = line.split_whitespace();
    let mut next = |what: &str| -> Result<usize> {
        let token = tokens
            .next()
            .ok_or_else(|| SchedulingError::parse(line_no, format!("missing {what}")))?;
        token.parse().map_err(|_| {
            SchedulingError::parse(line_no, format!("invalid {what} '{token}'"))
        })
    };
    let jobs = next("number of jobs")?;
    let machines = next("number of machines")?;
    Ok((jobs, machines))
}

fn parse_job(
    line_no: usize,
    line: &str,
    job: usize,
    num_machines: usize,
) -> Result<(Vec<usize>, Vec<i64>)> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() != 2 * num_machines {
        return Err(SchedulingError::parse(
            line_no,
            format!(
                "job {job} has {} values, expected {} machine/time pairs",
                tokens.len(),
                num_machines
            ),
        ));
    }

    let mut machines = Vec::with_capacity(num_machines);
    let mut durations = Vec::with_capacity(num_machines);
    for (op, pair) in tokens.chunks_exact(2).enumerate() {
        let machine = pair[0].parse::<usize>().map_err(|_| {
            SchedulingError::parse(
                line_no,
                format!("invalid machine '{}' for job {job}, operation {op}", pair[0]),
            )
        })?;
        let time = pair[1].parse::<i64>().map_err(|_| {
            SchedulingError::parse(
                line_no,
                format!("invalid time '{}' for job {job}, operation {op}", pair[1]),
            )
        })?;
        machines.push(machine);
        durations.push(time);
    }
    Ok((machines, durations))
}

#[cfg(test)]
mod tests {
    use super::*;

    const FT03: &str = "\
# three jobs, three machines
3 3
0 3 1 2 2 2

0 2 2 1 1 4
# last job
1 4 2 3 0 1
";

    fn line_of(err: SchedulingError) -> usize {
        match err {
            SchedulingError::Parse { line, .. } => line,
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_with_comments_and_blanks() {
        let inst = parse_instance(FT03).unwrap();
        assert_eq!(inst.num_jobs, 3);
        assert_eq!(inst.num_machines, 3);
        assert_eq!(inst.machines[1], vec![0, 2, 1]);
        assert_eq!(inst.durations[2], vec![4, 3, 1]);
    }

    #[test]
    fn test_round_trip_text() {
        let inst = parse_instance(FT03).unwrap();
        assert_eq!(parse_instance(&inst.to_text()).unwrap(), inst);
    }

    #[test]
    fn test_missing_header() {
        assert_eq!(line_of(parse_instance("# nothing\n\n").unwrap_err()), 1);
    }

    #[test]
    fn test_bad_header() {
        assert_eq!(line_of(parse_instance("3\n").unwrap_err()), 1);
        assert_eq!(line_of(parse_instance("x 3\n").unwrap_err()), 1);
        assert_eq!(line_of(parse_instance("-1 3\n").unwrap_err()), 1);
        assert_eq!(line_of(parse_instance("0 3\n").unwrap_err()), 1);
    }

    #[test]
    fn test_limits_checked_before_reading_jobs() {
        let err = parse_instance_with_limits("5 5\n", &InstanceLimits::new(4, 10)).unwrap_err();
        assert_eq!(line_of(err), 1);
    }

    #[test]
    fn test_missing_job_line() {
        let err = parse_instance("2 1\n0 4\n").unwrap_err();
        assert_eq!(line_of(err), 2);
    }

    #[test]
    fn test_missing_time() {
        let err = parse_instance("1 2\n0 4 1\n").unwrap_err();
        assert_eq!(line_of(err), 2);
    }

    #[test]
    fn test_extra_values_rejected() {
        let err = parse_instance("1 1\n0 4 1 1\n").unwrap_err();
        assert_eq!(line_of(err), 2);
    }

    #[test]
    fn test_non_integer_token() {
        let err = parse_instance("1 2\n0 4 one 2\n").unwrap_err();
        assert!(err.to_string().contains("invalid machine 'one'"));
    }

    #[test]
    fn test_trailing_content_rejected() {
        let err = parse_instance("1 1\n0 4\n0 4\n").unwrap_err();
        assert_eq!(line_of(err), 3);
    }

    #[test]
    fn test_semantic_errors_are_validation_errors() {
        let err = parse_instance("1 2\n0 4 0 2\n").unwrap_err();
        assert!(matches!(err, SchedulingError::InvalidInstance(_)));
        let err = parse_instance("1 1\n0 -4\n").unwrap_err();
        assert!(matches!(err, SchedulingError::InvalidInstance(_)));
    }

    #[test]
    fn test_overflowing_total_work_rejected() {
        let err = parse_instance("2 1\n0 9223372036854775807\n0 1\n").unwrap_err();
        match err {
            SchedulingError::InvalidInstance(errors) => {
                assert_eq!(errors.len(), 1);
                assert_eq!(
                    errors[0].kind,
                    crate::validation::ValidationErrorKind::DurationOutOfRange
                );
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_read_missing_file() {
        let err = read_instance("/nonexistent/instance.txt").unwrap_err();
        assert!(matches!(err, SchedulingError::Io(_)));
    }
}
