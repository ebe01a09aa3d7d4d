//! Process execution.
use anyhow::{Context, Result, bail};
use std::path::Path;
use std::process::{Command, ExitStatus, Output};

/// Result of a command execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecResult {
    /// Captured standard output (empty when the child inherited stdout).
    pub stdout: String,
    /// Captured standard error (empty when the child inherited stderr).
    pub stderr: String,
    /// Whether the process exited successfully.
    pub success: bool,
    /// Exit code, if the process exited normally.
    pub code: Option<i32>,
}

impl From<Output> for ExecResult {
    fn from(output: Output) -> Self {
        Self {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            success: output.status.success(),
            code: output.status.code(),
        }
    }
}

impl From<ExitStatus> for ExecResult {
    fn from(status: ExitStatus) -> Self {
        Self {
            stdout: String::new(),
            stderr: String::new(),
            success: status.success(),
            code: status.code(),
        }
    }
}

/// Runs config-supplied command lines.
///
/// Config content is operator-trusted: command lines are handed to the
/// platform shell verbatim.
#[cfg_attr(test, mockall::automock)]
pub trait Executor {
    /// Run `command_line` through the platform shell with `dir` as working
    /// directory, inheriting stdio, and wait for it to finish.
    ///
    /// A non-zero exit is reported through [`ExecResult::success`], not as
    /// an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the shell cannot be spawned.
    fn shell(&self, command_line: &str, dir: &Path) -> Result<ExecResult>;
}

/// [`Executor`] that spawns real processes.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemExecutor;

impl Executor for SystemExecutor {
    fn shell(&self, command_line: &str, dir: &Path) -> Result<ExecResult> {
        let status = shell_command(command_line)
            .current_dir(dir)
            .status()
            .with_context(|| format!("failed to execute: {command_line}"))?;
        Ok(ExecResult::from(status))
    }
}

/// Build the platform shell invocation for `command_line`.
fn shell_command(command_line: &str) -> Command {
    #[cfg(windows)]
    {
        let mut cmd = Command::new("cmd");
        cmd.args(["/C", command_line]);
        cmd
    }
    #[cfg(not(windows))]
    {
        let mut cmd = Command::new("sh");
        cmd.args(["-c", command_line]);
        cmd
    }
}

/// Run a program with captured output. Fails if the command exits non-zero.
///
/// # Errors
///
/// Returns an error if the program cannot be spawned or exits non-zero.
pub fn run(program: &str, args: &[&str]) -> Result<ExecResult> {
    let output = Command::new(program)
        .args(args)
        .output()
        .with_context(|| format!("failed to execute: {program}"))?;
    let result = ExecResult::from(output);
    if !result.success {
        bail!(
            "{program} failed (exit {}): {}",
            result.code.unwrap_or(-1),
            result.stderr.trim()
        );
    }
    Ok(result)
}
