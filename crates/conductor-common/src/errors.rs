//! Error types for the conductor launcher.
//!
//! Launching and waiting fail in two distinct ways, and callers need to tell
//! them apart:
//!
//! - [`LaunchError`]: the child could not be started at all. Nothing was
//!   created, so there is no process identifier to report.
//! - [`ExitError`]: the child ran (it has a PID) but terminated
//!   unsuccessfully, or its termination status could not be collected.
//!
//! Both are plain data. Neither is ever turned into a panic or a process exit
//! of the runner itself.
//!
//! ```rust
//! use conductor_common::{ExitError, ProcessId};
//!
//! let err = ExitError::non_zero_exit(ProcessId::new(4242), 1);
//! assert_eq!(err.exit_code(), Some(1));
//! assert!(err.to_string().contains("non-zero status 1"));
//! ```

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::types::ProcessId;

/// Result type alias for conductor operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Umbrella error for operations that are neither a launch nor a wait.
#[derive(Debug, Error)]
pub enum Error {
    /// The child could not be started.
    #[error(transparent)]
    Launch(#[from] LaunchError),

    /// The child ran but did not finish successfully.
    #[error(transparent)]
    Exit(#[from] ExitError),

    /// A lifecycle transition that the state machine does not allow.
    #[error("Invalid state transition: expected {expected}, got {actual}")]
    InvalidState {
        expected: String,
        actual: String,
    },

    /// Invalid caller input (command-line values, environment overrides).
    #[error("Validation error: {message}")]
    Validation {
        message: String,
    },
}

impl Error {
    /// Creates an InvalidState error.
    pub fn invalid_state(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Self::InvalidState {
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Creates a Validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
}

// ==============================================================================
// Launch Errors
// ==============================================================================

/// The operating system refused to create the child process.
///
/// Every variant keeps the original [`io::Error`] as its source.
#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("could not start {program}: executable not found: {source}")]
    NotFound {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("could not start {program}: permission denied: {source}")]
    PermissionDenied {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("could not start {program}: not an executable: {source}")]
    NotExecutable {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("could not start {program}: working directory {} is not usable: {source}", .directory.display())]
    WorkingDirectory {
        program: String,
        directory: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("could not start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },
}

impl LaunchError {
    /// Classifies a spawn failure reported by the OS.
    pub fn from_io(program: impl Into<String>, source: io::Error) -> Self {
        let program = program.into();

        if is_exec_format_error(&source) {
            return Self::NotExecutable { program, source };
        }

        match source.kind() {
            io::ErrorKind::NotFound => Self::NotFound { program, source },
            io::ErrorKind::PermissionDenied => Self::PermissionDenied { program, source },
            _ => Self::Spawn { program, source },
        }
    }

    /// The child's working directory, not the executable, was the problem.
    pub fn working_directory(
        program: impl Into<String>,
        directory: impl Into<PathBuf>,
        source: io::Error,
    ) -> Self {
        Self::WorkingDirectory {
            program: program.into(),
            directory: directory.into(),
            source,
        }
    }

    /// The program that failed to start.
    pub fn program(&self) -> &str {
        match self {
            Self::NotFound { program, .. }
            | Self::PermissionDenied { program, .. }
            | Self::NotExecutable { program, .. }
            | Self::WorkingDirectory { program, .. }
            | Self::Spawn { program, .. } => program,
        }
    }

    /// The underlying OS error.
    pub fn io_error(&self) -> &io::Error {
        match self {
            Self::NotFound { source, .. }
            | Self::PermissionDenied { source, .. }
            | Self::NotExecutable { source, .. }
            | Self::WorkingDirectory { source, .. }
            | Self::Spawn { source, .. } => source,
        }
    }
}

#[cfg(unix)]
fn is_exec_format_error(err: &io::Error) -> bool {
    err.raw_os_error() == Some(nix::errno::Errno::ENOEXEC as i32)
}

#[cfg(not(unix))]
fn is_exec_format_error(err: &io::Error) -> bool {
    const ERROR_BAD_EXE_FORMAT: i32 = 193;
    err.raw_os_error() == Some(ERROR_BAD_EXE_FORMAT)
}

// ==============================================================================
// Exit Errors
// ==============================================================================

/// The child was launched but did not terminate successfully.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ExitError {
    #[error("process {pid} ran but exited with non-zero status {code}")]
    NonZeroExit { pid: ProcessId, code: i32 },

    #[error("process {pid} ran but was terminated by signal {signal} ({name})")]
    Signaled {
        pid: ProcessId,
        signal: i32,
        name: String,
    },

    #[error("could not wait on process {pid}: {reason}")]
    WaitFailed { pid: ProcessId, reason: String },

    #[error("process {pid} ran but terminated with unrecognized status: {status}")]
    Unrecognized { pid: ProcessId, status: String },
}

impl ExitError {
    pub fn non_zero_exit(pid: ProcessId, code: i32) -> Self {
        Self::NonZeroExit { pid, code }
    }

    pub fn signaled(pid: ProcessId, signal: i32, name: impl Into<String>) -> Self {
        Self::Signaled {
            pid,
            signal,
            name: name.into(),
        }
    }

    pub fn wait_failed(pid: ProcessId, reason: impl Into<String>) -> Self {
        Self::WaitFailed {
            pid,
            reason: reason.into(),
        }
    }

    pub fn unrecognized(pid: ProcessId, status: impl Into<String>) -> Self {
        Self::Unrecognized {
            pid,
            status: status.into(),
        }
    }

    /// PID of the process this failure belongs to.
    pub fn pid(&self) -> ProcessId {
        match self {
            Self::NonZeroExit { pid, .. }
            | Self::Signaled { pid, .. }
            | Self::WaitFailed { pid, .. }
            | Self::Unrecognized { pid, .. } => *pid,
        }
    }

    /// Exit code, when the child exited on its own.
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            Self::NonZeroExit { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// Terminating signal number, when the child was killed.
    pub fn signal(&self) -> Option<i32> {
        match self {
            Self::Signaled { signal, .. } => Some(*signal),
            _ => None,
        }
    }
}
