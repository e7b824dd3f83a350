//! File statuses and classification results.
use std::fmt;

/// Backup status of one configuration file.
///
/// Variant order is the display order used when sorting results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FileStatus {
    /// The file lives at its original location and is not yet stored.
    BackupAble,
    /// The file is already moved into, or tracked by, the backup store.
    Exists,
    /// Nothing was found for the pattern.
    NotExists,
    /// Display-only relabelling used when the whole application is absent.
    NotInstalled,
    /// The home entry is a symlink that does not resolve into the store.
    BrokenLink,
}

impl FileStatus {
    /// Label printed in reports.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::BackupAble => "Backup-able",
            Self::Exists => "Backup-ed",
            Self::NotExists => "Not exists",
            Self::NotInstalled => "Not installed",
            Self::BrokenLink => "WARNING: Broken link. You might want to fix it",
        }
    }
}

impl fmt::Display for FileStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

/// The status computed for one concrete, home-relative path.
///
/// Ordered by `(status, path)`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClassificationResult {
    /// Computed status; never [`FileStatus::NotInstalled`].
    pub status: FileStatus,
    /// Home-relative path produced by pattern expansion.
    pub path: String,
}

impl ClassificationResult {
    /// Pair a status with a path.
    #[must_use]
    pub fn new(status: FileStatus, path: impl Into<String>) -> Self {
        Self {
            status,
            path: path.into(),
        }
    }
}
