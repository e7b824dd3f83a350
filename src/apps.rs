//! Application descriptors and the database that loads them.
//!
//! Each application is described by one `<id>.cfg` file:
//!
//! ```ini
//! [application]
//! name = Vim
//!
//! [configuration_files]
//! .vimrc
//! .vim/*.vim
//!
//! [xdg_configuration_files]
//! nvim/init.lua
//! ```
//!
//! XDG-scoped patterns are joined onto `$XDG_CONFIG_HOME` and re-expressed
//! relative to `$HOME`, so every pattern in the resulting set is home-relative.
use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::config::ini::{self, IniDocument};
use crate::environment::Environment;
use crate::error::{ConfigError, StatusError, ValidationError};

/// Extension recognised for descriptor files.
pub const DESCRIPTOR_EXTENSION: &str = "cfg";

const APPLICATION_SECTION: &str = "application";
const FILES_SECTION: &str = "configuration_files";
const XDG_FILES_SECTION: &str = "xdg_configuration_files";

/// One tracked application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationDescriptor {
    /// Unique key: the descriptor file name without extension.
    pub id: String,
    /// Human-friendly name shown in reports.
    pub display_name: String,
    /// Home-relative glob patterns, deduplicated.
    pub file_patterns: BTreeSet<String>,
}

impl ApplicationDescriptor {
    /// Build a descriptor from a parsed descriptor file.
    ///
    /// `xdg_config_home` must already be validated; when `None`, the
    /// `[xdg_configuration_files]` section is checked but contributes nothing.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingOption`] when `[application] name` is
    /// absent and [`ValidationError::AbsolutePath`] for any absolute pattern.
    pub fn from_document(
        id: &str,
        doc: &IniDocument,
        home: &Path,
        xdg_config_home: Option<&Path>,
    ) -> Result<Self, StatusError> {
        let file = format!("{id}.{DESCRIPTOR_EXTENSION}");

        let display_name = doc
            .get(APPLICATION_SECTION, "name")
            .filter(|n| !n.is_empty())
            .ok_or_else(|| ConfigError::MissingOption {
                file: file.clone(),
                section: APPLICATION_SECTION.to_string(),
                option: "name".to_string(),
            })?
            .to_string();

        let mut file_patterns = BTreeSet::new();
        for pattern in doc.option_names(FILES_SECTION) {
            reject_absolute(&file, pattern)?;
            file_patterns.insert(pattern.to_string());
        }

        for pattern in doc.option_names(XDG_FILES_SECTION) {
            reject_absolute(&file, pattern)?;
            if let Some(xdg) = xdg_config_home {
                let full = xdg.join(pattern);
                let relative = full.strip_prefix(home).unwrap_or(&full);
                file_patterns.insert(relative.to_string_lossy().into_owned());
            }
        }

        Ok(Self {
            id: id.to_string(),
            display_name,
            file_patterns,
        })
    }
}

fn reject_absolute(file: &str, pattern: &str) -> Result<(), ValidationError> {
    if pattern.starts_with('/') || Path::new(pattern).is_absolute() {
        return Err(ValidationError::AbsolutePath {
            descriptor: file.to_string(),
            path: pattern.to_string(),
        });
    }
    Ok(())
}

/// All known applications, keyed by id. Immutable once loaded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplicationDatabase {
    apps: BTreeMap<String, ApplicationDescriptor>,
}

impl ApplicationDatabase {
    /// Load every descriptor found in `directories`.
    ///
    /// Descriptor files reached through several directories (or through
    /// symlinks) are read once. When two distinct files share an id, the one
    /// from the later directory wins.
    ///
    /// # Errors
    ///
    /// Returns an error if a directory cannot be listed, a descriptor cannot
    /// be parsed or lacks a display name, a pattern is absolute, or
    /// `XDG_CONFIG_HOME` is set but invalid.
    pub fn load(directories: &[PathBuf], env: &Environment) -> Result<Self, StatusError> {
        let xdg_config_home = env.validated_xdg_config_home()?;

        let mut apps = BTreeMap::new();
        for path in discover_descriptors(directories)? {
            let Some(id) = path.file_stem().map(|s| s.to_string_lossy().into_owned()) else {
                continue;
            };
            let doc = ini::parse_file(&path)?;
            let descriptor =
                ApplicationDescriptor::from_document(&id, &doc, &env.home, xdg_config_home)?;
            debug!(
                "loaded {} ({} patterns) from {}",
                id,
                descriptor.file_patterns.len(),
                path.display()
            );
            if apps.insert(id.clone(), descriptor).is_some() {
                warn!("application '{id}' is defined more than once; using {}", path.display());
            }
        }

        Ok(Self { apps })
    }

    /// Build a database from descriptors directly.
    #[must_use]
    pub fn from_descriptors(descriptors: impl IntoIterator<Item = ApplicationDescriptor>) -> Self {
        Self {
            apps: descriptors.into_iter().map(|d| (d.id.clone(), d)).collect(),
        }
    }

    /// Display name of application `id`.
    #[must_use]
    pub fn get_name(&self, id: &str) -> Option<&str> {
        self.apps.get(id).map(|d| d.display_name.as_str())
    }

    /// Declared file patterns of application `id`.
    #[must_use]
    pub fn get_files(&self, id: &str) -> Option<&BTreeSet<String>> {
        self.apps.get(id).map(|d| &d.file_patterns)
    }

    /// All application ids, sorted.
    pub fn get_app_names(&self) -> impl Iterator<Item = &str> {
        self.apps.keys().map(String::as_str)
    }

    /// Look up a whole descriptor.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&ApplicationDescriptor> {
        self.apps.get(id)
    }

    /// Iterate over descriptors in id order.
    pub fn iter(&self) -> impl Iterator<Item = &ApplicationDescriptor> {
        self.apps.values()
    }

    /// Number of applications.
    #[must_use]
    pub fn len(&self) -> usize {
        self.apps.len()
    }

    /// Return `true` if no application is known.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.apps.is_empty()
    }
}

/// List `*.cfg` files in each directory, deduplicated by canonical path and
/// kept in directory order (entries sorted by name within a directory).
fn discover_descriptors(directories: &[PathBuf]) -> Result<Vec<PathBuf>, ConfigError> {
    let mut seen = HashSet::new();
    let mut found = Vec::new();

    for dir in directories {
        let entries = std::fs::read_dir(dir).map_err(|source| ConfigError::Io {
            path: dir.clone(),
            source,
        })?;

        let mut paths = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| ConfigError::Io {
                path: dir.clone(),
                source,
            })?;
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == DESCRIPTOR_EXTENSION) && path.is_file() {
                paths.push(path);
            }
        }
        paths.sort();

        for path in paths {
            let key = dunce::canonicalize(&path).unwrap_or_else(|_| path.clone());
            if seen.insert(key) {
                found.push(path);
            } else {
                debug!("skipping duplicate descriptor {}", path.display());
            }
        }
    }

    Ok(found)
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    fn doc(content: &str) -> IniDocument {
        ini::parse_str(content, "test.cfg").expect("test data should parse")
    }

    #[test]
    fn descriptor_collects_patterns() {
        let d = ApplicationDescriptor::from_document(
            "vim",
            &doc("[application]\nname = Vim\n[configuration_files]\n.vimrc\n.vim\n.vimrc\n"),
            Path::new("/home/u"),
            None,
        )
        .unwrap();
        assert_eq!(d.id, "vim");
        assert_eq!(d.display_name, "Vim");
        assert_eq!(
            d.file_patterns.iter().collect::<Vec<_>>(),
            vec![".vim", ".vimrc"]
        );
    }

    #[test]
    fn descriptor_without_name_fails() {
        let err = ApplicationDescriptor::from_document(
            "vim",
            &doc("[configuration_files]\n.vimrc\n"),
            Path::new("/home/u"),
            None,
        )
        .unwrap_err();
        assert!(err.to_string().contains("'name'"));
    }

    #[test]
    fn absolute_pattern_is_rejected() {
        let err = ApplicationDescriptor::from_document(
            "vim",
            &doc("[application]\nname = Vim\n[configuration_files]\n/etc/vimrc\n"),
            Path::new("/home/u"),
            None,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            StatusError::Validation(ValidationError::AbsolutePath { .. })
        ));
    }

    #[test]
    fn absolute_xdg_pattern_is_rejected_even_without_xdg() {
        let err = ApplicationDescriptor::from_document(
            "nvim",
            &doc("[application]\nname = Neovim\n[xdg_configuration_files]\n/nvim\n"),
            Path::new("/home/u"),
            None,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            StatusError::Validation(ValidationError::AbsolutePath { .. })
        ));
    }

    #[test]
    fn xdg_patterns_become_home_relative() {
        let d = ApplicationDescriptor::from_document(
            "nvim",
            &doc("[application]\nname = Neovim\n[configuration_files]\n.nvimrc\n[xdg_configuration_files]\nnvim/init.lua\n"),
            Path::new("/home/u"),
            Some(Path::new("/home/u/.config")),
        )
        .unwrap();
        assert_eq!(
            d.file_patterns.iter().collect::<Vec<_>>(),
            vec![".config/nvim/init.lua", ".nvimrc"]
        );
    }

    #[test]
    fn xdg_patterns_ignored_without_xdg() {
        let d = ApplicationDescriptor::from_document(
            "nvim",
            &doc("[application]\nname = Neovim\n[xdg_configuration_files]\nnvim/init.lua\n"),
            Path::new("/home/u"),
            None,
        )
        .unwrap();
        assert!(d.file_patterns.is_empty());
    }

    #[test]
    fn database_accessors() {
        let db = ApplicationDatabase::from_descriptors([ApplicationDescriptor {
            id: "git".to_string(),
            display_name: "Git".to_string(),
            file_patterns: BTreeSet::from([".gitconfig".to_string()]),
        }]);
        assert_eq!(db.len(), 1);
        assert_eq!(db.get_name("git"), Some("Git"));
        assert_eq!(db.get_files("git").map(BTreeSet::len), Some(1));
        assert_eq!(db.get_app_names().collect::<Vec<_>>(), vec!["git"]);
        assert_eq!(db.get_name("svn"), None);
    }

    #[test]
    fn discover_skips_other_extensions_and_duplicates() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.cfg"), "").unwrap();
        std::fs::write(dir.path().join("b.txt"), "").unwrap();
        std::fs::create_dir(dir.path().join("c.cfg")).unwrap();
        let dirs = vec![dir.path().to_path_buf(), dir.path().to_path_buf()];
        let found = discover_descriptors(&dirs).unwrap();
        assert_eq!(found, vec![dir.path().join("a.cfg")]);
    }

    #[test]
    fn discover_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = discover_descriptors(&[dir.path().join("absent")]).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
