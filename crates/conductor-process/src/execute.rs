//! Process execution primitives.
//!
//! [`LaunchSpec`] describes what to run; [`launch`] asks the OS to create it.
//! The child inherits stdin, stdout and stderr. Nothing is captured.

use conductor_common::LaunchError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use tracing::debug;

/// Immutable description of a child to launch.
///
/// # Examples
///
/// ```rust
/// use conductor_process::LaunchSpec;
///
/// let spec = LaunchSpec::new("./Rust/my_rust_program")
///     .arg("--verbose")
///     .env("RUST_LOG", "debug");
///
/// assert_eq!(spec.get_args(), ["--verbose"]);
/// assert_eq!(spec.get_envs().get("RUST_LOG").map(String::as_str), Some("debug"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaunchSpec {
    program: PathBuf,
    #[serde(default)]
    args: Vec<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    env: BTreeMap<String, String>,
    #[serde(default)]
    clear_env: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    current_dir: Option<PathBuf>,
}

impl LaunchSpec {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            env: BTreeMap::new(),
            clear_env: false,
            current_dir: None,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Set or override one environment variable for the child.
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    pub fn envs<I, K, V>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.env
            .extend(vars.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Start the child with an empty environment (plus any `env` overrides).
    pub fn clear_env(mut self) -> Self {
        self.clear_env = true;
        self
    }

    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.current_dir = Some(dir.into());
        self
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    pub fn get_args(&self) -> &[String] {
        &self.args
    }

    pub fn get_envs(&self) -> &BTreeMap<String, String> {
        &self.env
    }

    pub fn clears_env(&self) -> bool {
        self.clear_env
    }

    pub fn working_directory(&self) -> Option<&Path> {
        self.current_dir.as_deref()
    }

    /// Human-readable program name for logs and error messages.
    pub fn program_label(&self) -> String {
        self.program.display().to_string()
    }

    /// Build the `Command` this spec describes.
    pub fn to_command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);

        if self.clear_env {
            cmd.env_clear();
        }
        cmd.envs(&self.env);

        if let Some(ref dir) = self.current_dir {
            cmd.current_dir(dir);
        }

        cmd.stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        cmd
    }
}

/// Launch the process described by `spec`.
///
/// Returns as soon as the OS has created the child; it does not wait for it.
/// No checks are made beyond what the OS spawn call performs. When the spawn
/// fails and the requested working directory is not a directory, the error
/// blames the directory rather than the executable.
pub fn launch(spec: &LaunchSpec) -> Result<Child, LaunchError> {
    debug!(
        "Launching {} with {} argument(s), {} env override(s)",
        spec.program_label(),
        spec.args.len(),
        spec.env.len()
    );

    spec.to_command().spawn().map_err(|e| classify_spawn_error(spec, e))
}

fn classify_spawn_error(spec: &LaunchSpec, err: io::Error) -> LaunchError {
    match spec.working_directory() {
        // std reports a missing working directory as ENOENT, same as a missing program
        Some(dir) if !dir.is_dir() => {
            LaunchError::working_directory(spec.program_label(), dir, err)
        }
        _ => LaunchError::from_io(spec.program_label(), err),
    }
}
