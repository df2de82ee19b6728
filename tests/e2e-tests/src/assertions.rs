//! Custom assertions for E2E tests

use std::process::ExitStatus;

use crate::output_parser::OutputParser;

/// Conductor must exit 0 whatever happened to its child
pub fn assert_runner_exited_normally(status: ExitStatus) -> Result<(), String> {
    if status.success() {
        Ok(())
    } else {
        Err(format!("Conductor itself failed with status: {}", status))
    }
}

/// Output has a start line ahead of the status line; returns the reported PID.
///
/// Child output may come before or after the start line.
pub fn assert_started(output: &[String]) -> Result<u32, String> {
    let parser = OutputParser::new(output.to_vec());

    let pid = parser
        .started_pid()
        .ok_or_else(|| format!("Expected a start line. Output:\n{:#?}", output))?;

    if let Some(status) = parser.status_line() {
        if !parser.contains_sequence(&["started, pid=", status]) {
            return Err(format!("Status line printed before start line:\n{:#?}", output));
        }
    }

    Ok(pid)
}

pub fn assert_success(output: &[String]) -> Result<(), String> {
    let parser = OutputParser::new(output.to_vec());

    match parser.status_line() {
        Some("success") => Ok(()),
        other => Err(format!("Expected success, got {:?}. Output:\n{:#?}", other, output)),
    }
}

/// Status line is `failed: ...` and contains `pattern`
pub fn assert_failed_with(output: &[String], pattern: &str) -> Result<(), String> {
    let parser = OutputParser::new(output.to_vec());

    match parser.status_line() {
        Some(line) if line.starts_with("failed: ") && line.contains(pattern) => Ok(()),
        other => Err(format!(
            "Expected failure containing {:?}, got {:?}. Output:\n{:#?}",
            pattern, other, output
        )),
    }
}

/// A launch failure prints nothing but the failure line
pub fn assert_not_started(output: &[String]) -> Result<(), String> {
    let parser = OutputParser::new(output.to_vec());

    if parser.started_pid().is_some() {
        return Err(format!("Child unexpectedly started. Output:\n{:#?}", output));
    }
    assert_failed_with(output, "could not start")
}
