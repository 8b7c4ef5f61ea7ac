//! Process execution for featsweep.
//!
//! This crate provides utilities for running external build tools
//! with proper error handling and either captured or inherited output.
//!
//! # Example
//!
//! ```ignore
//! use featsweep_process::run_captured;
//!
//! let result = run_captured("cargo", &["--version"], None).expect("run");
//! assert!(result.success);
//! assert!(result.stdout.contains("cargo"));
//! ```

use std::path::Path;
use std::process::{Command, Output, Stdio};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Result of a command execution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandResult {
    /// Whether the command succeeded (exit code 0)
    pub success: bool,
    /// Exit code (if available)
    pub exit_code: Option<i32>,
    /// Standard output (empty when the child inherited the streams)
    pub stdout: String,
    /// Standard error (empty when the child inherited the streams)
    pub stderr: String,
    /// Duration of execution
    pub duration_ms: u64,
}

impl CommandResult {
    /// Check if the command succeeded
    pub fn ok(&self) -> Result<&Self> {
        if self.success {
            Ok(self)
        } else {
            Err(anyhow::anyhow!(
                "command failed with exit code {:?}: {}",
                self.exit_code,
                self.stderr
            ))
        }
    }

    /// Create a result from a process output
    pub fn from_output(output: &Output, duration: Duration) -> Self {
        Self {
            success: output.status.success(),
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            duration_ms: duration.as_millis() as u64,
        }
    }
}

/// Run a command and capture its output, optionally in a specific directory.
pub fn run_captured(program: &str, args: &[&str], dir: Option<&Path>) -> Result<CommandResult> {
    let start = std::time::Instant::now();

    let mut cmd = Command::new(program);
    cmd.args(args);
    if let Some(dir) = dir {
        cmd.current_dir(dir);
    }

    let output = cmd
        .output()
        .with_context(|| format!("failed to run command: {program} {args:?}"))?;

    Ok(CommandResult::from_output(&output, start.elapsed()))
}

/// Run a command with stdout/stderr inherited from the parent.
///
/// The delegated build tool's output goes straight to the caller's
/// streams; only the exit status is captured.
pub fn run_streaming(program: &str, args: &[&str], dir: Option<&Path>) -> Result<CommandResult> {
    let start = std::time::Instant::now();

    let mut cmd = Command::new(program);
    cmd.args(args).stdout(Stdio::inherit()).stderr(Stdio::inherit());
    if let Some(dir) = dir {
        cmd.current_dir(dir);
    }

    let status = cmd
        .status()
        .with_context(|| format!("failed to run command: {program} {args:?}"))?;

    Ok(CommandResult {
        success: status.success(),
        exit_code: status.code(),
        stdout: String::new(),
        stderr: String::new(),
        duration_ms: start.elapsed().as_millis() as u64,
    })
}

/// Check if a command exists in PATH
pub fn command_exists(program: &str) -> bool {
    which::which(program).is_ok()
}

/// Get the full path to a command
pub fn which(program: &str) -> Option<std::path::PathBuf> {
    which::which(program).ok()
}
