//! Test Scenario 1.1: Launch and Wait
//!
//! Runs conductor against TESTEXE and checks the two-line report for the
//! basic child outcomes: clean exit, non-zero exit and a panicking child.

use e2e_tests::assertions::{
    assert_failed_with, assert_runner_exited_normally, assert_started, assert_success,
};
use e2e_tests::TestExecutor;

fn report(name: &str, result: Result<(), String>) {
    match result {
        Ok(()) => {
            println!("\n========================================");
            println!("✓ TEST PASSED: {}", name);
            println!("========================================\n");
        }
        Err(e) => {
            println!("\n========================================");
            println!("✗ TEST FAILED: {}", name);
            println!("Error: {}", e);
            println!("========================================\n");
            panic!("Test failed: {}", e);
        }
    }
}

#[test]
fn test_child_exits_cleanly() {
    println!("\n========================================");
    println!("TEST: Child Exits Cleanly");
    println!("========================================\n");

    let executor = TestExecutor::new("clean-exit");
    let args = executor.testexe_command(&[], &[]);

    let result = executor.run_to_completion(args).and_then(|(status, output)| {
        assert_runner_exited_normally(status)?;
        let pid = assert_started(&output)?;
        println!("✓ Child reported with PID {}", pid);
        assert_success(&output)?;
        println!("✓ Reported success");

        if output.len() != 2 {
            return Err(format!("Expected exactly two lines, got {:#?}", output));
        }
        Ok(())
    });

    report("Child Exits Cleanly", result);
}

#[test]
fn test_child_exits_with_error_code() {
    println!("\n========================================");
    println!("TEST: Child Exits With Error Code");
    println!("========================================\n");

    let executor = TestExecutor::new("exit-code");
    let args = executor.testexe_command(&[], &["--exit-code", "3"]);

    let result = executor.run_to_completion(args).and_then(|(status, output)| {
        // Runner still exits 0; the failure is only in the report
        assert_runner_exited_normally(status)?;
        let pid = assert_started(&output)?;
        assert_failed_with(&output, &format!("process {}", pid))?;
        assert_failed_with(&output, "non-zero status 3")?;
        println!("✓ Non-zero exit reported as failure");
        Ok(())
    });

    report("Child Exits With Error Code", result);
}

#[test]
fn test_child_crashes() {
    println!("\n========================================");
    println!("TEST: Child Crashes");
    println!("========================================\n");

    let executor = TestExecutor::new("crash");
    let args = executor.testexe_command(&[], &["--crash"]);

    let result = executor.run_to_completion(args).and_then(|(status, output)| {
        assert_runner_exited_normally(status)?;
        assert_started(&output)?;
        // Rust panics exit with status 101
        assert_failed_with(&output, "non-zero status 101")?;
        println!("✓ Panic reported as failure");
        Ok(())
    });

    report("Child Crashes", result);
}

#[test]
fn test_json_report() {
    println!("\n========================================");
    println!("TEST: JSON Report");
    println!("========================================\n");

    let executor = TestExecutor::new("json-report");
    let args = executor.testexe_command(&["--json"], &["--exit-code", "7"]);

    let result = executor.run_to_completion(args).and_then(|(status, output)| {
        assert_runner_exited_normally(status)?;
        let pid = assert_started(&output)?;
        assert_failed_with(&output, "non-zero status 7")?;

        let last = output.last().ok_or("No output")?;
        let json: serde_json::Value =
            serde_json::from_str(last).map_err(|e| format!("Bad JSON {:?}: {}", last, e))?;

        if json["pid"] != serde_json::json!(pid) {
            return Err(format!("JSON pid {} != reported pid {}", json["pid"], pid));
        }
        if json["outcome"]["status"] != "failed" || json["outcome"]["exit_code"] != 7 {
            return Err(format!("Unexpected outcome: {}", json["outcome"]));
        }
        if json["final_state"] != "terminated" {
            return Err(format!("Unexpected final state: {}", json["final_state"]));
        }
        println!("✓ JSON report matches the text report");
        Ok(())
    });

    report("JSON Report", result);
}
