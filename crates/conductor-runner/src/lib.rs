//! # Conductor Runner
//!
//! Launch a child executable, expose its PID immediately, block until it
//! exits, and report success or failure.
//!
//! **Architecture:**
//! ```text
//! ChildProcessRunner (launch / wait / run)
//!       ↓ uses
//! conductor-process (spawn, exit status classification)
//!       ↓ tracked by
//! conductor-process-state (NotStarted → Launched → Terminated)
//! ```
//!
//! Launch failures come back as [`LaunchError`](conductor_common::LaunchError),
//! unsuccessful terminations as [`RunResult::Failure`]. Neither aborts the
//! caller.

pub mod report;
pub mod result;
pub mod runner;

pub use report::{RunOutcome, RunReport};
pub use result::RunResult;
pub use runner::{ChildProcessRunner, RunningProcess};

pub use conductor_common::{ExitError, LaunchError, ProcessId};
pub use conductor_process::LaunchSpec;
pub use conductor_process_state::RunState;
