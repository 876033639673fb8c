//! Solution writers.
//!
//! Text format: the makespan on the first line, then one line per job with
//! that job's operation start times separated by spaces.

use std::fs;
use std::path::Path;

use crate::error::Result;
use crate::models::Solution;

/// Renders a solution in the text format.
pub fn format_solution(solution: &Solution) -> String {
    let mut out = format!("{}\n", solution.makespan);
    for starts in solution.start_times() {
        let line = starts
            .iter()
            .map(i64::to_string)
            .collect::<Vec<_>>()
            .join(" ");
        out.push_str(&line);
        out.push('\n');
    }
    out
}

/// Writes a solution in the text format.
pub fn write_solution(path: impl AsRef<Path>, solution: &Solution) -> Result<()> {
    fs::write(path, format_solution(solution))?;
    Ok(())
}

/// Writes a solution as pretty-printed JSON.
pub fn write_solution_json(path: impl AsRef<Path>, solution: &Solution) -> Result<()> {
    let json = serde_json::to_string_pretty(solution)?;
    fs::write(path, json)?;
    Ok(())
}
