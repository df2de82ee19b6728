use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::{debug, info, warn};

use conductor_process::{parse_env_assignment, validate_program, LaunchSpec};
use conductor_runner::ChildProcessRunner;

/// Program launched when none is given.
const DEFAULT_PROGRAM: &str = "./Rust/my_rust_program";

/// Conductor - start a child program, print its PID, wait for it, report the outcome
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Program to launch
    #[arg(
        env = "CONDUCTOR_PROGRAM",
        default_value = DEFAULT_PROGRAM,
        value_parser = parse_program
    )]
    program: String,

    /// Arguments for the program, given after `--`
    #[arg(last = true, value_name = "ARGS")]
    args: Vec<String>,

    /// Set an environment variable for the child (repeatable)
    #[arg(short, long = "env", value_name = "KEY=VALUE", value_parser = parse_env_assignment)]
    env: Vec<(String, String)>,

    /// Start the child with an empty environment
    #[arg(long)]
    clear_env: bool,

    /// Working directory for the child
    #[arg(short = 'C', long, value_name = "DIR")]
    current_dir: Option<PathBuf>,

    /// Print the run report as JSON after the status line
    #[arg(long)]
    json: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    initialize_logging(args.debug)?;

    let spec = build_launch_spec(&args);
    debug!("Launch spec: {:?}", spec);

    let runner = ChildProcessRunner::new();
    let report = runner.run(&spec, |pid| {
        emit_line(&mut io::stdout().lock(), &format!("started, pid={}", pid));
    });

    emit_line(&mut io::stdout().lock(), &report.status_line());

    if args.json {
        emit_line(&mut io::stdout().lock(), &report.to_json()?);
    }

    // The runner's own exit status does not mirror the child's
    info!("Conductor finished: {}", report.status_line());
    Ok(())
}

/// Write one status line. A closed stdout is logged, never fatal.
fn emit_line(out: &mut impl Write, line: &str) {
    if let Err(e) = writeln!(out, "{}", line).and_then(|_| out.flush()) {
        warn!("Could not write {:?} to stdout: {}", line, e);
    }
}

fn parse_program(raw: &str) -> conductor_common::Result<String> {
    validate_program(raw)?;
    Ok(raw.to_string())
}

fn build_launch_spec(args: &Args) -> LaunchSpec {
    let mut spec = LaunchSpec::new(&args.program)
        .args(args.args.iter().cloned())
        .envs(args.env.iter().cloned());

    if args.clear_env {
        spec = spec.clear_env();
    }

    if let Some(ref dir) = args.current_dir {
        spec = spec.current_dir(dir);
    }

    spec
}

fn initialize_logging(debug: bool) -> Result<()> {
    let level = if debug { "debug" } else { "info" };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}
