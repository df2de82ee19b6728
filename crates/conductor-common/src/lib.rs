//! # Conductor Common
//!
//! Types shared across the conductor crates: the launch/exit error taxonomy
//! and the process identifier newtype.

pub mod errors;
pub mod types;

// Re-export commonly used items
pub use errors::{Error, ExitError, LaunchError, Result};
pub use types::ProcessId;
