//! Process existence checking.
//!
//! Lets callers confirm that a launched child is really running before they
//! start waiting on it.

use conductor_common::ProcessId;
use std::io;

/// Check if a process with the given PID exists.
///
/// On Unix this uses `kill(pid, 0)`, which delivers no signal. On Windows it
/// tries `OpenProcess`. A zombie (exited but not yet reaped) still counts as
/// existing on Unix.
///
/// # Returns
///
/// * `Ok(true)` - Process exists
/// * `Ok(false)` - Process does not exist
/// * `Err(_)` - The check itself failed
///
/// # Examples
///
/// ```rust,no_run
/// use conductor_common::ProcessId;
/// use conductor_process::process_exists;
///
/// if process_exists(ProcessId::new(1234)).unwrap() {
///     println!("Process 1234 is running");
/// }
/// ```
pub fn process_exists(pid: ProcessId) -> io::Result<bool> {
    #[cfg(unix)]
    {
        process_exists_unix(pid)
    }

    #[cfg(windows)]
    {
        process_exists_windows(pid)
    }
}

#[cfg(unix)]
fn process_exists_unix(pid: ProcessId) -> io::Result<bool> {
    use nix::errno::Errno;
    use nix::sys::signal::kill;
    use nix::unistd::Pid;

    let raw = i32::try_from(pid.as_u32())
        .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, format!("PID out of range: {}", pid)))?;

    match kill(Pid::from_raw(raw), None) {
        Ok(()) => Ok(true),
        Err(Errno::ESRCH) => Ok(false),
        // Exists, owned by someone else
        Err(Errno::EPERM) => Ok(true),
        Err(e) => Err(io::Error::from(e)),
    }
}

#[cfg(windows)]
fn process_exists_windows(pid: ProcessId) -> io::Result<bool> {
    use windows::Win32::Foundation::CloseHandle;
    use windows::Win32::System::Threading::{OpenProcess, PROCESS_QUERY_LIMITED_INFORMATION};

    const ERROR_INVALID_PARAMETER: u32 = 0x80070057;
    const ERROR_ACCESS_DENIED: u32 = 0x80070005;

    unsafe {
        match OpenProcess(PROCESS_QUERY_LIMITED_INFORMATION, false, pid.as_u32()) {
            Ok(handle) => {
                let _ = CloseHandle(handle);
                Ok(true)
            }
            Err(e) => match e.code().0 as u32 {
                ERROR_INVALID_PARAMETER => Ok(false),
                // Exists, but we may not query it
                ERROR_ACCESS_DENIED => Ok(true),
                _ => Err(io::Error::new(io::ErrorKind::Other, e.to_string())),
            },
        }
    }
}
