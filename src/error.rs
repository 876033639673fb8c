//! Error types.

use thiserror::Error;

use crate::validation::ValidationError;

/// Errors returned by the solver and its I/O helpers.
#[derive(Error, Debug)]
pub enum SchedulingError {
    #[error("Invalid instance: {}", join_messages(.0))]
    InvalidInstance(Vec<ValidationError>),
    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid concurrency limit: {0} (must be at least 1)")]
    InvalidConcurrency(usize),
    #[error("No dispatching rules to evaluate")]
    NoRules,
    #[error("Unknown dispatching rule: {0}")]
    UnknownRule(String),
    #[error("Failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

impl SchedulingError {
    pub(crate) fn parse(line: usize, message: impl Into<String>) -> Self {
        SchedulingError::Parse {
            line,
            message: message.into(),
        }
    }
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, SchedulingError>;

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}
