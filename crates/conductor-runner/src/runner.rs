//! The launch-then-wait runner.
//!
//! ```text
//! NotStarted --launch()--> Launched --wait()--> Terminated
//! ```
//!
//! `launch` hands back a [`RunningProcess`] that owns the child handle and
//! its PID. `wait` consumes it, so a PID can never be used after its process
//! has been reaped, and a second concurrent waiter cannot exist.

use crate::report::RunReport;
use crate::result::RunResult;
use chrono::{DateTime, Utc};
use conductor_common::{LaunchError, ProcessId};
use conductor_process::{launch, wait_for_exit, LaunchSpec};
use conductor_process_state::{RunState, RunStateMachine};
use std::process::Child;
use tracing::{info, warn};

/// An in-flight child between a successful launch and its wait.
#[derive(Debug)]
pub struct RunningProcess {
    pid: ProcessId,
    program: String,
    child: Child,
    launched_at: DateTime<Utc>,
    state_machine: RunStateMachine,
}

/// A child after its wait returned.
#[derive(Debug)]
pub(crate) struct CompletedRun {
    pub(crate) pid: ProcessId,
    pub(crate) result: RunResult,
    pub(crate) launched_at: DateTime<Utc>,
    pub(crate) terminated_at: DateTime<Utc>,
    pub(crate) state_machine: RunStateMachine,
}

impl RunningProcess {
    /// OS-assigned process identifier, available right after launch.
    pub fn pid(&self) -> ProcessId {
        self.pid
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn launched_at(&self) -> DateTime<Utc> {
        self.launched_at
    }

    pub fn state(&self) -> RunState {
        self.state_machine.current_state()
    }

    /// Block until the child terminates.
    pub fn wait(self) -> RunResult {
        self.finish().result
    }

    pub(crate) fn finish(mut self) -> CompletedRun {
        let result = RunResult::from(wait_for_exit(self.pid, &mut self.child));

        if let Err(e) = self.state_machine.transition_to_terminated(result.to_string()) {
            warn!("Run {} left its lifecycle: {}", self.program, e);
        }
        let terminated_at = self
            .state_machine
            .entered_at(RunState::Terminated)
            .unwrap_or_else(Utc::now);

        CompletedRun {
            pid: self.pid,
            result,
            launched_at: self.launched_at,
            terminated_at,
            state_machine: self.state_machine,
        }
    }
}

/// Launches one child at a time and waits for it.
///
/// The runner holds no state between runs; relaunching is up to the caller.
///
/// # Examples
///
/// ```rust,no_run
/// use conductor_process::LaunchSpec;
/// use conductor_runner::ChildProcessRunner;
///
/// let runner = ChildProcessRunner::new();
/// match runner.launch(&LaunchSpec::new("./Rust/my_rust_program")) {
///     Ok(process) => {
///         println!("started, pid={}", process.pid());
///         println!("{}", runner.wait(process));
///     }
///     Err(e) => println!("failed: {}", e),
/// }
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ChildProcessRunner;

impl ChildProcessRunner {
    pub fn new() -> Self {
        Self
    }

    /// Ask the OS to start the child described by `spec`.
    ///
    /// Does not block on the child. On failure nothing was created and no
    /// [`RunningProcess`] exists.
    pub fn launch(&self, spec: &LaunchSpec) -> Result<RunningProcess, LaunchError> {
        let program = spec.program_label();
        let mut state_machine = RunStateMachine::new(&program);

        let child = launch(spec).map_err(|e| {
            warn!("Failed to launch {}: {}", program, e);
            e
        })?;

        let pid = ProcessId::new(child.id());
        if let Err(e) = state_machine.transition_to_launched(pid) {
            warn!("Run {} left its lifecycle: {}", program, e);
        }
        let launched_at = state_machine
            .entered_at(RunState::Launched)
            .unwrap_or_else(Utc::now);

        info!("Launched {} (PID: {})", program, pid);

        Ok(RunningProcess {
            pid,
            program,
            child,
            launched_at,
            state_machine,
        })
    }

    /// Block until `process` terminates and report how it ended.
    pub fn wait(&self, process: RunningProcess) -> RunResult {
        process.wait()
    }

    /// Full cycle: launch, call `on_launched` with the PID, wait, report.
    ///
    /// `on_launched` runs before waiting starts and is skipped when the
    /// launch fails.
    pub fn run<F>(&self, spec: &LaunchSpec, on_launched: F) -> RunReport
    where
        F: FnOnce(ProcessId),
    {
        match self.launch(spec) {
            Ok(process) => {
                on_launched(process.pid());
                RunReport::completed(spec.clone(), process.finish())
            }
            Err(e) => RunReport::launch_failed(spec.clone(), &e),
        }
    }
}
