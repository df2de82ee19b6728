//! Terminal outcome of a launched child.

use conductor_common::ExitError;
use std::fmt;

/// What a [`wait`](crate::ChildProcessRunner::wait) produced. Exactly one per
/// launched process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunResult {
    /// Exit status zero
    Success,
    /// Non-zero exit, killed by a signal, or the wait itself failed
    Failure(ExitError),
}

impl RunResult {
    pub fn is_success(&self) -> bool {
        matches!(self, RunResult::Success)
    }

    pub fn failure(&self) -> Option<&ExitError> {
        match self {
            RunResult::Success => None,
            RunResult::Failure(e) => Some(e),
        }
    }

    /// Human-readable failure reason.
    pub fn reason(&self) -> Option<String> {
        self.failure().map(ToString::to_string)
    }

    pub fn into_result(self) -> Result<(), ExitError> {
        match self {
            RunResult::Success => Ok(()),
            RunResult::Failure(e) => Err(e),
        }
    }
}

impl From<Result<(), ExitError>> for RunResult {
    fn from(outcome: Result<(), ExitError>) -> Self {
        match outcome {
            Ok(()) => RunResult::Success,
            Err(e) => RunResult::Failure(e),
        }
    }
}

/// Renders the status line: `success` or `failed: <reason>`.
impl fmt::Display for RunResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunResult::Success => write!(f, "success"),
            RunResult::Failure(e) => write!(f, "failed: {}", e),
        }
    }
}
