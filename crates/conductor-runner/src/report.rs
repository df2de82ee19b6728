//! Structured record of one launch attempt.

use crate::result::RunResult;
use crate::runner::CompletedRun;
use chrono::{DateTime, Utc};
use conductor_common::{LaunchError, ProcessId};
use conductor_process::LaunchSpec;
use conductor_process_state::{RunState, StateTransition};
use serde::{Deserialize, Serialize};

/// How a launch attempt ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RunOutcome {
    Success,
    /// The child was never created
    LaunchFailed { reason: String },
    /// The child ran but did not succeed
    Failed {
        reason: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        exit_code: Option<i32>,
        #[serde(skip_serializing_if = "Option::is_none")]
        signal: Option<i32>,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub spec: LaunchSpec,
    pub pid: Option<ProcessId>,
    pub outcome: RunOutcome,
    pub launched_at: Option<DateTime<Utc>>,
    pub terminated_at: Option<DateTime<Utc>>,
    pub elapsed_ms: Option<i64>,
    pub final_state: RunState,
    pub transitions: Vec<StateTransition>,
}

impl RunReport {
    pub(crate) fn completed(spec: LaunchSpec, run: CompletedRun) -> Self {
        let outcome = match &run.result {
            RunResult::Success => RunOutcome::Success,
            RunResult::Failure(e) => RunOutcome::Failed {
                reason: e.to_string(),
                exit_code: e.exit_code(),
                signal: e.signal(),
            },
        };

        Self {
            spec,
            pid: Some(run.pid),
            outcome,
            launched_at: Some(run.launched_at),
            terminated_at: Some(run.terminated_at),
            elapsed_ms: run
                .state_machine
                .run_duration()
                .map(|d| d.num_milliseconds()),
            final_state: run.state_machine.current_state(),
            transitions: run.state_machine.state_history().to_vec(),
        }
    }

    pub(crate) fn launch_failed(spec: LaunchSpec, error: &LaunchError) -> Self {
        Self {
            spec,
            pid: None,
            outcome: RunOutcome::LaunchFailed {
                reason: error.to_string(),
            },
            launched_at: None,
            terminated_at: None,
            elapsed_ms: None,
            final_state: RunState::NotStarted,
            transitions: Vec::new(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self.outcome, RunOutcome::Success)
    }

    /// True when the child could not be started at all.
    pub fn is_launch_failure(&self) -> bool {
        matches!(self.outcome, RunOutcome::LaunchFailed { .. })
    }

    pub fn reason(&self) -> Option<&str> {
        match &self.outcome {
            RunOutcome::Success => None,
            RunOutcome::LaunchFailed { reason } | RunOutcome::Failed { reason, .. } => Some(reason),
        }
    }

    /// `success` or `failed: <reason>`.
    pub fn status_line(&self) -> String {
        match self.reason() {
            None => "success".to_string(),
            Some(reason) => format!("failed: {}", reason),
        }
    }

    /// Single-line JSON rendering.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
