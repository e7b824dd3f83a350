//! Base classifier: presence at home means backup-able.
use std::path::PathBuf;

use super::StatusClassifier;
use super::helpers;
use crate::status::FileStatus;

/// Reports every file found under home as [`FileStatus::BackupAble`].
#[derive(Debug, Clone)]
pub struct BaseClassifier {
    home: PathBuf,
}

impl BaseClassifier {
    /// Create a classifier rooted at `home`.
    #[must_use]
    pub const fn new(home: PathBuf) -> Self {
        Self { home }
    }
}

impl StatusClassifier for BaseClassifier {
    fn name(&self) -> &'static str {
        "base"
    }

    fn get_status(&self, file: &str) -> Option<FileStatus> {
        helpers::exists(&self.home.join(file)).then_some(FileStatus::BackupAble)
    }
}
