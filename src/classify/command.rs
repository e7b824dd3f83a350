//! Command classifier: an external inventory lists already-tracked files.
use std::collections::HashSet;
use std::path::PathBuf;

use tracing::{debug, warn};

use super::StatusClassifier;
use super::helpers;
use crate::error::CommandError;
use crate::exec::Executor;
use crate::status::FileStatus;

/// Classifies against the output of a user-supplied inventory command
/// (e.g. `yadm list -a` or `git ls-files`).
#[derive(Debug, Clone)]
pub struct CommandClassifier {
    home: PathBuf,
    tracked: HashSet<String>,
}

impl CommandClassifier {
    /// Run `command` in `home` and remember every whitespace-separated token
    /// of its combined output as a tracked path.
    ///
    /// A non-zero exit is logged; the captured output is still used.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError::Spawn`] if the command cannot be started.
    pub fn new(home: PathBuf, command: &str, executor: &dyn Executor) -> Result<Self, CommandError> {
        debug!("running inventory command in {}: {command}", home.display());
        let result = executor.run_shell_in(&home, command)?;
        if !result.success {
            warn!(
                "inventory command exited with code {}: {command}",
                result.code.unwrap_or(-1)
            );
        }
        let tracked: HashSet<String> = result
            .combined()
            .split_whitespace()
            .map(str::to_string)
            .collect();
        debug!("inventory command reported {} tracked paths", tracked.len());
        Ok(Self::with_tracked(home, tracked))
    }

    /// Create a classifier from an already known tracked-set.
    #[must_use]
    pub const fn with_tracked(home: PathBuf, tracked: HashSet<String>) -> Self {
        Self { home, tracked }
    }

    #[cfg(test)]
    pub(crate) const fn tracked(&self) -> &HashSet<String> {
        &self.tracked
    }
}

impl StatusClassifier for CommandClassifier {
    fn name(&self) -> &'static str {
        "command"
    }

    fn get_status(&self, file: &str) -> Option<FileStatus> {
        if self.tracked.contains(file) {
            Some(FileStatus::Exists)
        } else if helpers::exists(&self.home.join(file)) {
            Some(FileStatus::BackupAble)
        } else {
            None
        }
    }
}
