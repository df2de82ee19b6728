//! Core domain types shared by the conductor crates.

use serde::{Deserialize, Serialize};
use std::fmt;

/// OS-assigned process identifier of a launched child.
///
/// # Example
/// ```
/// use conductor_common::ProcessId;
///
/// let pid = ProcessId::from(1234);
/// assert_eq!(pid.as_u32(), 1234);
/// assert_eq!(pid.to_string(), "1234");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProcessId(u32);

impl ProcessId {
    /// Creates a new ProcessId from a raw PID.
    pub fn new(pid: u32) -> Self {
        Self(pid)
    }

    /// Returns the raw PID.
    pub fn as_u32(&self) -> u32 {
        self.0
    }
}

impl From<u32> for ProcessId {
    fn from(pid: u32) -> Self {
        Self(pid)
    }
}

impl fmt::Display for ProcessId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
