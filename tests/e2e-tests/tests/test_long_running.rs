//! Test Scenario 1.3: Long-Running Child
//!
//! The start line must appear while the child is still running, the PID it
//! reports must be the child's own, and the outcome only after it exits.

use conductor_process::process_exists;
use conductor_common::ProcessId;
use e2e_tests::assertions::{assert_runner_exited_normally, assert_success};
use e2e_tests::TestExecutor;
use std::fs;
use std::time::Duration;

#[test]
fn test_pid_reported_before_exit() {
    println!("\n========================================");
    println!("TEST: PID Reported Before Exit");
    println!("========================================\n");

    let executor = TestExecutor::new("long-running");
    let pid_file = executor.test_dir().join("testexe.pid");
    let pid_file_arg = pid_file.display().to_string();
    let args = executor.testexe_command(
        &[],
        &["--run-duration-ms", "1500", "--pid-file", &pid_file_arg],
    );

    let result = executor.run_test(args, |conductor| {
        // Step 1: start line shows up before the child finishes
        println!("Step 1: Waiting for the start line...");
        let pid = conductor.wait_for_started(Duration::from_secs(10))?;

        if conductor.parser().status_line().is_some() {
            return Err("Outcome printed before the child exited".to_string());
        }
        if !conductor.is_running() {
            return Err("Conductor exited before its child".to_string());
        }
        println!("✓ Conductor still waiting on PID {}\n", pid);

        // Step 2: the reported PID is a live process
        println!("Step 2: Checking the child is alive...");
        match process_exists(ProcessId::new(pid)) {
            Ok(true) => println!("✓ PID {} is alive\n", pid),
            Ok(false) => return Err(format!("PID {} is not running", pid)),
            Err(e) => return Err(format!("Could not check PID {}: {}", pid, e)),
        }

        // Step 3: the child agrees on its PID
        println!("Step 3: Comparing with the child's PID file...");
        let mut written = None;
        for _ in 0..100 {
            if let Ok(content) = fs::read_to_string(&pid_file) {
                written = content.trim().parse::<u32>().ok();
                if written.is_some() {
                    break;
                }
            }
            std::thread::sleep(Duration::from_millis(20));
        }
        match written {
            Some(child_pid) if child_pid == pid => println!("✓ PID file matches\n"),
            other => return Err(format!("PID file says {:?}, conductor said {}", other, pid)),
        }

        Ok(())
    });

    let result = result.and_then(|(status, output)| {
        assert_runner_exited_normally(status)?;
        assert_success(&output)
    });

    match result {
        Ok(()) => {
            println!("\n========================================");
            println!("✓ TEST PASSED: PID Reported Before Exit");
            println!("========================================\n");
        }
        Err(e) => {
            println!("\n========================================");
            println!("✗ TEST FAILED: PID Reported Before Exit");
            println!("Error: {}", e);
            println!("========================================\n");
            panic!("Test failed: {}", e);
        }
    }
}
