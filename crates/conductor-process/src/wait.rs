//! Waiting on a child and interpreting its termination status.

use conductor_common::{ExitError, ProcessId};
use std::process::{Child, ExitStatus};
use tracing::{error, info, warn};

/// Block until `child` terminates and classify the outcome.
///
/// A failing `wait` call (already reaped, invalid handle) is reported as
/// [`ExitError::WaitFailed`]; it never panics.
pub fn wait_for_exit(pid: ProcessId, child: &mut Child) -> Result<(), ExitError> {
    match child.wait() {
        Ok(status) => {
            let outcome = classify_exit_status(pid, status);
            match &outcome {
                Ok(()) => info!("Process {} exited successfully", pid),
                Err(e) => warn!("Process {} terminated unsuccessfully: {}", pid, e),
            }
            outcome
        }
        Err(e) => {
            error!("Failed to wait for process {}: {}", pid, e);
            Err(ExitError::wait_failed(pid, e.to_string()))
        }
    }
}

/// Map an OS exit status to success or an [`ExitError`].
///
/// Success means exit code zero and nothing else.
pub fn classify_exit_status(pid: ProcessId, status: ExitStatus) -> Result<(), ExitError> {
    if status.success() {
        return Ok(());
    }

    if let Some(code) = status.code() {
        return Err(ExitError::non_zero_exit(pid, code));
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;

        if let Some(signal) = status.signal() {
            return Err(ExitError::signaled(pid, signal, signal_name(signal)));
        }
    }

    Err(ExitError::unrecognized(pid, status.to_string()))
}

#[cfg(unix)]
fn signal_name(signal: i32) -> String {
    nix::sys::signal::Signal::try_from(signal)
        .map(|s| s.as_str().to_string())
        .unwrap_or_else(|_| "unknown".to_string())
}
