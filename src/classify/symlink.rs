//! Symlink classifier: home entries should be symlinks into a managed store.
use std::path::PathBuf;

use super::StatusClassifier;
use super::helpers::{exists, is_real_entry, is_symlink, same_file};
use crate::status::FileStatus;

/// Checks that `home/<f>` is a symlink resolving to `store/<f>`.
///
/// Decision table for `H = home/f`, `B = store/f`, first match wins:
///
/// | # | condition                                           | status        |
/// |---|-----------------------------------------------------|---------------|
/// | 1 | `H` is a real entry, unless `B` is a symlink to `H` | `BackupAble`  |
/// | 2 | `H` is a symlink that does not resolve to `B`       | `BrokenLink`  |
/// | 3 | `B` exists and `H`, `B` are the same file           | `Exists`      |
/// | 4 | otherwise                                           | no opinion    |
///
/// Row 1's exception and row 3 together also accept the inverted farm layout,
/// where the file stays at home and the store holds a symlink to it.
#[derive(Debug, Clone)]
pub struct SymlinkClassifier {
    home: PathBuf,
    store: PathBuf,
}

impl SymlinkClassifier {
    /// Create a classifier for `home` backed by the managed `store`.
    #[must_use]
    pub const fn new(home: PathBuf, store: PathBuf) -> Self {
        Self { home, store }
    }
}

impl StatusClassifier for SymlinkClassifier {
    fn name(&self) -> &'static str {
        "symlink"
    }

    fn get_status(&self, file: &str) -> Option<FileStatus> {
        let home_path = self.home.join(file);
        let store_path = self.store.join(file);

        if is_real_entry(&home_path)
            && !(is_symlink(&store_path) && same_file(&home_path, &store_path))
        {
            return Some(FileStatus::BackupAble);
        }

        let linked = exists(&store_path) && same_file(&home_path, &store_path);

        if is_symlink(&home_path) && !linked {
            return Some(FileStatus::BrokenLink);
        }

        linked.then_some(FileStatus::Exists)
    }
}

#[cfg(all(test, unix))]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::os::unix::fs::symlink;
    use tempfile::TempDir;

    struct Fixture {
        _root: TempDir,
        home: PathBuf,
        store: PathBuf,
    }

    impl Fixture {
        fn new() -> Self {
            let root = tempfile::tempdir().unwrap();
            let home = root.path().join("home");
            let store = home.join("store");
            std::fs::create_dir_all(home.join("app")).unwrap();
            std::fs::create_dir_all(store.join("app")).unwrap();
            Self {
                _root: root,
                home,
                store,
            }
        }

        fn classifier(&self) -> SymlinkClassifier {
            SymlinkClassifier::new(self.home.clone(), self.store.clone())
        }

        fn home_file(&self) -> PathBuf {
            self.home.join("app/conf")
        }

        fn store_file(&self) -> PathBuf {
            self.store.join("app/conf")
        }
    }

    #[test]
    fn home_symlink_into_store_is_exists() {
        let fx = Fixture::new();
        std::fs::write(fx.store_file(), "x").unwrap();
        symlink(fx.store_file(), fx.home_file()).unwrap();
        assert_eq!(fx.classifier().get_status("app/conf"), Some(FileStatus::Exists));
    }

    #[test]
    fn dangling_home_symlink_is_broken() {
        let fx = Fixture::new();
        symlink(fx.store_file(), fx.home_file()).unwrap();
        assert_eq!(
            fx.classifier().get_status("app/conf"),
            Some(FileStatus::BrokenLink)
        );
    }

    #[test]
    fn home_symlink_elsewhere_is_broken() {
        let fx = Fixture::new();
        let elsewhere = fx.home.join("elsewhere");
        std::fs::write(&elsewhere, "x").unwrap();
        std::fs::write(fx.store_file(), "y").unwrap();
        symlink(&elsewhere, fx.home_file()).unwrap();
        assert_eq!(
            fx.classifier().get_status("app/conf"),
            Some(FileStatus::BrokenLink)
        );
    }

    #[test]
    fn real_home_file_is_backup_able() {
        let fx = Fixture::new();
        std::fs::write(fx.home_file(), "x").unwrap();
        assert_eq!(
            fx.classifier().get_status("app/conf"),
            Some(FileStatus::BackupAble)
        );
    }

    #[test]
    fn real_home_file_with_unrelated_store_copy_is_backup_able() {
        let fx = Fixture::new();
        std::fs::write(fx.home_file(), "x").unwrap();
        std::fs::write(fx.store_file(), "x").unwrap();
        assert_eq!(
            fx.classifier().get_status("app/conf"),
            Some(FileStatus::BackupAble)
        );
    }

    #[test]
    fn real_home_directory_is_backup_able() {
        let fx = Fixture::new();
        assert_eq!(fx.classifier().get_status("app"), Some(FileStatus::BackupAble));
    }

    #[test]
    fn store_symlink_to_home_file_is_exists() {
        let fx = Fixture::new();
        std::fs::write(fx.home_file(), "x").unwrap();
        symlink(fx.home_file(), fx.store_file()).unwrap();
        assert_eq!(fx.classifier().get_status("app/conf"), Some(FileStatus::Exists));
    }

    #[test]
    fn nothing_anywhere_has_no_opinion() {
        let fx = Fixture::new();
        assert_eq!(fx.classifier().get_status("app/conf"), None);
    }

    #[test]
    fn store_only_has_no_opinion() {
        let fx = Fixture::new();
        std::fs::write(fx.store_file(), "x").unwrap();
        assert_eq!(fx.classifier().get_status("app/conf"), None);
    }
}
