use std::{fmt, time::Duration};

use once_cell::sync::Lazy;
use regex::Regex;

static LINE_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bline (\d+)").unwrap());

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExecutionFailure {
    pub message: String,
    /// 1-based line of the generated code, when the interpreter reported one.
    pub line: Option<usize>,
}

impl ExecutionFailure {
    /// Summarise an interpreter's error output by its last line and innermost line number.
    pub fn from_stderr(stderr: &str) -> Self {
        let message = stderr
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .last()
            .unwrap_or("execution failed");
        let line = LINE_PATTERN
            .captures_iter(stderr)
            .last()
            .and_then(|captures| captures[1].parse().ok());
        ExecutionFailure {
            message: String::from(message),
            line,
        }
    }
}

impl fmt::Display for ExecutionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "{} (line {line})", self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExecutionResult {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
    pub failure: Option<ExecutionFailure>,
    pub elapsed: Duration,
}

impl ExecutionResult {
    pub fn failed(message: String, elapsed: Duration) -> Self {
        ExecutionResult {
            success: false,
            stdout: String::new(),
            stderr: String::new(),
            failure: Some(ExecutionFailure {
                message,
                line: None,
            }),
            elapsed,
        }
    }
}

/// Runs generated source text; owns cancellation and time limits.
pub trait Executor {
    fn execute(&self, code: &str) -> ExecutionResult;
}
