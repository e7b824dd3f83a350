//! Shell command execution.
use std::path::Path;
use std::process::{Command, Output};

use crate::error::CommandError;

/// Result of a command execution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecResult {
    /// Captured standard output.
    pub stdout: String,
    /// Captured standard error.
    pub stderr: String,
    /// Whether the process exited successfully.
    pub success: bool,
    /// Exit code, if the process was not killed by a signal.
    pub code: Option<i32>,
}

impl ExecResult {
    /// Standard output followed by standard error.
    #[must_use]
    pub fn combined(&self) -> String {
        let mut out = String::with_capacity(self.stdout.len() + self.stderr.len() + 1);
        out.push_str(&self.stdout);
        if !self.stdout.is_empty() && !self.stderr.is_empty() && !self.stdout.ends_with('\n') {
            out.push('\n');
        }
        out.push_str(&self.stderr);
        out
    }
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

/// Runs shell command lines.
///
/// Abstracted so that callers can be tested without spawning processes.
#[cfg_attr(test, mockall::automock)]
pub trait Executor {
    /// Run `command` through the platform shell with `dir` as working
    /// directory, blocking until it exits.
    ///
    /// A non-zero exit status is reported through [`ExecResult::success`],
    /// not as an error.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError::Spawn`] if the shell cannot be started.
    fn run_shell_in(&self, dir: &Path, command: &str) -> Result<ExecResult, CommandError>;
}

/// [`Executor`] backed by [`std::process::Command`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemExecutor;

impl Executor for SystemExecutor {
    fn run_shell_in(&self, dir: &Path, command: &str) -> Result<ExecResult, CommandError> {
        #[cfg(windows)]
        let mut cmd = {
            let mut cmd = Command::new("cmd");
            cmd.args(["/C", command]);
            cmd
        };
        #[cfg(not(windows))]
        let mut cmd = {
            let mut cmd = Command::new("sh");
            cmd.args(["-c", command]);
            cmd
        };

        let output = cmd
            .current_dir(dir)
            .output()
            .map_err(|source| CommandError::Spawn {
                command: command.to_string(),
                source,
            })?;
        Ok(ExecResult::from(output))
    }
}
