//! Input validation for launch parameters supplied by a user.
//!
//! The launch itself performs no checks; these helpers are for front ends
//! turning text (command-line values) into a `LaunchSpec`.

use conductor_common::{Error, Result};

/// Validate that a program path was given at all.
pub fn validate_program(path: &str) -> Result<()> {
    if path.trim().is_empty() {
        return Err(Error::validation("Program path cannot be empty"));
    }

    if path.contains('\0') {
        return Err(Error::validation("Program path cannot contain NUL bytes"));
    }

    Ok(())
}

/// Validate an environment variable name.
pub fn validate_env_key(key: &str) -> Result<()> {
    if key.is_empty() {
        return Err(Error::validation("Environment variable name cannot be empty"));
    }

    if key.contains('=') || key.contains('\0') {
        return Err(Error::validation(format!(
            "Environment variable name cannot contain '=' or NUL: {:?}",
            key
        )));
    }

    Ok(())
}

/// Parse a `KEY=VALUE` assignment. The value may be empty or contain `=`.
pub fn parse_env_assignment(raw: &str) -> Result<(String, String)> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| Error::validation(format!("Expected KEY=VALUE, got: {:?}", raw)))?;

    validate_env_key(key)?;

    if value.contains('\0') {
        return Err(Error::validation(format!(
            "Value of {} cannot contain NUL bytes",
            key
        )));
    }

    Ok((key.to_string(), value.to_string()))
}
