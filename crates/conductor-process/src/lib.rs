//! # Conductor Process
//!
//! Low-level process operations for the conductor launcher.
//!
//! This crate provides the primitives the runner is built from:
//! - Describing and spawning a child (`execute`)
//! - Waiting and classifying the termination status (`wait`)
//! - Process existence checks (`check`)
//! - Validation of user-supplied launch parameters (`validation`)

pub mod check;
pub mod execute;
pub mod validation;
pub mod wait;

// Re-export main types
pub use check::*;
pub use execute::*;
pub use validation::*;
pub use wait::*;
