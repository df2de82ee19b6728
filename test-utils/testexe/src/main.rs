use clap::Parser;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::{debug, error, info};

/// Test child program for conductor E2E testing
#[derive(Parser, Debug)]
#[command(name = "testexe")]
#[command(about = "Test executable for launcher testing", long_about = None)]
struct Args {
    /// Milliseconds to stay alive before exiting
    #[arg(long, default_value = "0")]
    run_duration_ms: u64,

    /// Exit code to return (for testing failure scenarios)
    #[arg(long, default_value = "0")]
    exit_code: i32,

    /// Panic instead of exiting normally
    #[arg(long)]
    crash: bool,

    /// Write own PID to this file once running
    #[arg(long)]
    pid_file: Option<PathBuf>,

    /// Print `NAME=value` for these environment variables to stdout
    #[arg(long, value_name = "NAME")]
    print_env: Vec<String>,

    /// Print the working directory to stdout
    #[arg(long)]
    print_cwd: bool,
}

fn main() {
    // Logs on stderr; stdout is reserved for the --print-* output
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_line_number(false)
        .with_file(false)
        .init();

    let args = Args::parse();
    info!("Starting testexe with args: {:?}", args);

    if let Some(path) = &args.pid_file {
        if let Err(e) = std::fs::write(path, std::process::id().to_string()) {
            error!("Failed to write PID file {}: {}", path.display(), e);
            std::process::exit(1);
        }
        info!("Wrote PID to file: {}", path.display());
    }

    for name in &args.print_env {
        match std::env::var(name) {
            Ok(value) => println!("{}={}", name, value),
            Err(_) => println!("{}=<unset>", name),
        }
    }

    if args.print_cwd {
        match std::env::current_dir() {
            Ok(dir) => println!("{}", dir.display()),
            Err(e) => {
                error!("Failed to read working directory: {}", e);
                std::process::exit(1);
            }
        }
    }

    if args.run_duration_ms > 0 {
        let start = Instant::now();
        let duration = Duration::from_millis(args.run_duration_ms);
        while start.elapsed() < duration {
            std::thread::sleep(Duration::from_millis(50).min(duration));
            debug!("Running... ({}/{} ms)", start.elapsed().as_millis(), args.run_duration_ms);
        }
        info!("Run duration ({} ms) reached", args.run_duration_ms);
    }

    if args.crash {
        error!("Testexe crashing as requested!");
        panic!("Simulated crash");
    }

    info!("Testexe stopped");
    std::process::exit(args.exit_code);
}
