//! Read-only file-system probes shared by the classifiers.
use std::path::Path;

/// Return `true` if `path` resolves (following symlinks) to an existing file
/// or directory.
#[must_use]
pub fn exists(path: &Path) -> bool {
    path.exists()
}

/// Return `true` if `path` itself is a real file or directory, not a symlink.
#[must_use]
pub fn is_real_entry(path: &Path) -> bool {
    std::fs::symlink_metadata(path).is_ok_and(|m| !m.file_type().is_symlink())
}

/// Return `true` if `path` itself is a symlink, dangling or not.
#[must_use]
pub fn is_symlink(path: &Path) -> bool {
    std::fs::symlink_metadata(path).is_ok_and(|m| m.file_type().is_symlink())
}

/// Return `true` if `a` and `b` both exist and resolve to the same file.
///
/// Missing or unreadable paths are never the same file.
#[must_use]
pub fn same_file(a: &Path, b: &Path) -> bool {
    #[cfg(unix)]
    {
        use std::os::unix::fs::MetadataExt as _;
        match (std::fs::metadata(a), std::fs::metadata(b)) {
            (Ok(ma), Ok(mb)) => ma.dev() == mb.dev() && ma.ino() == mb.ino(),
            _ => false,
        }
    }

    #[cfg(not(unix))]
    {
        match (dunce::canonicalize(a), dunce::canonicalize(b)) {
            (Ok(ca), Ok(cb)) => ca == cb,
            _ => false,
        }
    }
}
