use chrono::{DateTime, Utc};
use conductor_common::{Error, ProcessId, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle of a single launch attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunState {
    /// No process has been created yet
    NotStarted,
    /// The OS accepted the launch and the child has a PID
    Launched,
    /// The wait returned, successfully or not
    Terminated,
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunState::NotStarted => write!(f, "not_started"),
            RunState::Launched => write!(f, "launched"),
            RunState::Terminated => write!(f, "terminated"),
        }
    }
}

impl RunState {
    /// Check if the run has reached its final state
    pub fn is_terminal(&self) -> bool {
        matches!(self, RunState::Terminated)
    }

    /// Check if a child process currently exists for this run
    pub fn has_live_child(&self) -> bool {
        matches!(self, RunState::Launched)
    }
}

/// State machine enforcing `NotStarted -> Launched -> Terminated`.
#[derive(Debug, Clone)]
pub struct RunStateMachine {
    label: String,
    current_state: RunState,
    previous_state: Option<RunState>,
    state_history: Vec<StateTransition>,
}

/// Represents a state transition with timestamp and optional reason
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateTransition {
    pub from_state: RunState,
    pub to_state: RunState,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl RunStateMachine {
    /// Create a new state machine for the given program label
    pub fn new(label: &str) -> Self {
        Self {
            label: label.to_string(),
            current_state: RunState::NotStarted,
            previous_state: None,
            state_history: Vec::new(),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn current_state(&self) -> RunState {
        self.current_state
    }

    pub fn previous_state(&self) -> Option<RunState> {
        self.previous_state
    }

    pub fn state_history(&self) -> &[StateTransition] {
        &self.state_history
    }

    /// Check if a transition from current state to target state is valid.
    ///
    /// There are exactly two legal edges. Re-entering the current state is
    /// rejected as well: a run is launched once and terminates once.
    pub fn is_valid_transition(&self, target_state: RunState) -> bool {
        matches!(
            (self.current_state, target_state),
            (RunState::NotStarted, RunState::Launched) | (RunState::Launched, RunState::Terminated)
        )
    }

    /// Transition to a new state with optional reason
    pub fn transition_to(&mut self, target_state: RunState, reason: Option<String>) -> Result<()> {
        if !self.is_valid_transition(target_state) {
            return Err(Error::invalid_state(
                format!("transition to {} from a valid predecessor", target_state),
                self.current_state.to_string(),
            ));
        }

        let now = Utc::now();
        let from_state = self.current_state;
        self.state_history.push(StateTransition {
            from_state,
            to_state: target_state,
            timestamp: now,
            reason,
        });
        self.previous_state = Some(from_state);
        self.current_state = target_state;

        tracing::debug!(
            "Run {} transitioned from {:?} to {:?}",
            self.label,
            from_state,
            target_state
        );

        Ok(())
    }

    pub fn transition_to_launched(&mut self, pid: ProcessId) -> Result<()> {
        self.transition_to(RunState::Launched, Some(format!("Launched with PID {}", pid)))
    }

    pub fn transition_to_terminated(&mut self, reason: String) -> Result<()> {
        self.transition_to(RunState::Terminated, Some(reason))
    }

    /// Time spent in the current state
    pub fn last_transition(&self) -> Option<&StateTransition> {
        self.state_history.last()
    }

    /// When the machine entered `state`, if it ever did
    pub fn entered_at(&self, state: RunState) -> Option<DateTime<Utc>> {
        self.state_history
            .iter()
            .find(|t| t.to_state == state)
            .map(|t| t.timestamp)
    }

    /// Time between launch and termination, once both happened
    pub fn run_duration(&self) -> Option<chrono::Duration> {
        Some(self.entered_at(RunState::Terminated)? - self.entered_at(RunState::Launched)?)
    }
}
