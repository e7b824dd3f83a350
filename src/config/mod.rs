//! Main configuration: classification method, apps directories and ignores.
pub mod ini;

use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use regex::Regex;

use crate::environment::Environment;
use crate::error::{ConfigError, StatusError, ValidationError};

const CORE_SECTION: &str = "core";
const IGNORE_SECTION: &str = "ignore_paths";

/// How the status of a single file is decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Method {
    /// A file at its original location is backup-able; nothing else is known.
    #[default]
    Base,
    /// An external inventory command lists the files already tracked.
    Command,
    /// Files are expected to be symlinks into a managed store directory.
    Symlink,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Base => write!(f, "base"),
            Self::Command => write!(f, "command"),
            Self::Symlink => write!(f, "symlink"),
        }
    }
}

impl FromStr for Method {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "base" => Ok(Self::Base),
            "command" => Ok(Self::Command),
            "symlink" => Ok(Self::Symlink),
            other => Err(ValidationError::UnknownMethod(other.to_string())),
        }
    }
}

/// Compiled `[ignore_paths]` patterns; each must match a whole path.
#[derive(Debug, Clone, Default)]
pub struct IgnoreRules {
    patterns: Vec<Regex>,
}

impl IgnoreRules {
    /// Compile `patterns` anchored at both ends.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidIgnorePattern`] for the first pattern
    /// that does not compile.
    pub fn new<'a>(patterns: impl IntoIterator<Item = &'a str>) -> Result<Self, ValidationError> {
        let patterns = patterns
            .into_iter()
            .map(|p| {
                Regex::new(&format!("^(?:{p})$")).map_err(|e| {
                    ValidationError::InvalidIgnorePattern {
                        pattern: p.to_string(),
                        message: e.to_string(),
                    }
                })
            })
            .collect::<Result<_, _>>()?;
        Ok(Self { patterns })
    }

    /// Return `true` if `path` fully matches any pattern.
    #[must_use]
    pub fn is_ignored(&self, path: &str) -> bool {
        self.patterns.iter().any(|re| re.is_match(path))
    }

    /// Number of compiled patterns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Return `true` if there are no patterns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

/// Everything the scan needs, built once and passed down read-only.
#[derive(Debug, Clone, Default)]
pub struct Configuration {
    /// Directories holding application descriptors, already resolved.
    pub apps_dirs: Vec<PathBuf>,
    /// Chosen classification method.
    pub method: Method,
    /// Shell command listing tracked files; present iff `method` is `Command`.
    pub command: Option<String>,
    /// Managed store directory; present iff `method` is `Symlink`.
    pub managed_store_dir: Option<PathBuf>,
    /// Paths excluded from every report.
    pub ignore: IgnoreRules,
    /// Home-relative paths already known to be backed up (e.g. piped on stdin).
    pub externally_backed_up: HashSet<String>,
    /// Report verbosity (0..=3).
    pub verbosity: u8,
}

impl Configuration {
    /// Load the main configuration file.
    ///
    /// `base_dir` anchors relative `APPS_DIR` entries (normally the directory
    /// of the running executable). A relative `SYMLINK_DIR` is resolved
    /// against the home directory.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the file is missing, unreadable, malformed
    /// or lacks `[core] APPS_DIR`, and a [`ValidationError`] for an unknown
    /// method, a missing method-specific option or a bad ignore pattern.
    pub fn load(path: &Path, base_dir: &Path, env: &Environment) -> Result<Self, StatusError> {
        let doc = ini::parse_file(path)?;
        Self::from_document(&doc, &file_label(path), base_dir, env)
    }

    /// Build a configuration from an already parsed document.
    ///
    /// # Errors
    ///
    /// See [`Configuration::load`].
    pub fn from_document(
        doc: &ini::IniDocument,
        file: &str,
        base_dir: &Path,
        env: &Environment,
    ) -> Result<Self, StatusError> {
        let core = doc
            .section(CORE_SECTION)
            .ok_or_else(|| ConfigError::MissingSection {
                file: file.to_string(),
                section: CORE_SECTION.to_string(),
            })?;

        let apps_dir = core.get("APPS_DIR").ok_or_else(|| ConfigError::MissingOption {
            file: file.to_string(),
            section: CORE_SECTION.to_string(),
            option: "APPS_DIR".to_string(),
        })?;

        let method = core.get("METHOD").map_or(Ok(Method::Base), str::parse)?;

        let missing = |option: &str| ValidationError::MissingMethodOption {
            method: method.to_string(),
            option: option.to_string(),
        };

        let command = match method {
            Method::Command => Some(
                core.get("COMMAND")
                    .filter(|c| !c.is_empty())
                    .ok_or_else(|| missing("COMMAND"))?
                    .to_string(),
            ),
            _ => None,
        };

        let managed_store_dir = match method {
            Method::Symlink => Some(
                core.get("SYMLINK_DIR")
                    .filter(|d| !d.is_empty())
                    .map(|d| env.home_path(d))
                    .ok_or_else(|| missing("SYMLINK_DIR"))?,
            ),
            _ => None,
        };

        let ignore = IgnoreRules::new(doc.option_names(IGNORE_SECTION))?;

        Ok(Self {
            apps_dirs: resolve_apps_dirs(apps_dir, base_dir),
            method,
            command,
            managed_store_dir,
            ignore,
            externally_backed_up: HashSet::new(),
            verbosity: 0,
        })
    }
}

/// Split a comma-separated `APPS_DIR` value and anchor each entry at `base_dir`.
///
/// # Examples
///
/// ```
/// use std::path::{Path, PathBuf};
/// use dotfiles_status::config::resolve_apps_dirs;
///
/// let dirs = resolve_apps_dirs(" apps , /srv/more,", Path::new("/opt/dotstatus"));
/// assert_eq!(dirs, [PathBuf::from("/opt/dotstatus/apps"), PathBuf::from("/srv/more")]);
/// ```
#[must_use]
pub fn resolve_apps_dirs(value: &str, base_dir: &Path) -> Vec<PathBuf> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| base_dir.join(s))
        .collect()
}

/// Parse the out-of-band list of backed-up paths, one per line.
///
/// Trailing whitespace is removed and empty lines are dropped.
#[must_use]
pub fn parse_backed_up(input: &str) -> HashSet<String> {
    input
        .lines()
        .map(str::trim_end)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect()
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned())
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    fn env() -> Environment {
        Environment::new("/home/user", None)
    }

    fn from_str(content: &str) -> Result<Configuration, StatusError> {
        let doc = ini::parse_str(content, "dotstatus.cfg").expect("test data should parse");
        Configuration::from_document(&doc, "dotstatus.cfg", Path::new("/opt/ds"), &env())
    }

    #[test]
    fn method_defaults_to_base() {
        let config = from_str("[core]\nAPPS_DIR = apps\n").unwrap();
        assert_eq!(config.method, Method::Base);
        assert_eq!(config.apps_dirs, vec![PathBuf::from("/opt/ds/apps")]);
        assert!(config.command.is_none());
        assert!(config.managed_store_dir.is_none());
        assert!(config.ignore.is_empty());
    }

    #[test]
    fn command_method_requires_command() {
        let err = from_str("[core]\nAPPS_DIR = apps\nMETHOD = command\n").unwrap_err();
        assert!(matches!(
            err,
            StatusError::Validation(ValidationError::MissingMethodOption { .. })
        ));
    }

    #[test]
    fn command_method_reads_command() {
        let config =
            from_str("[core]\nAPPS_DIR = apps\nMETHOD = command\nCOMMAND = yadm list -a\n").unwrap();
        assert_eq!(config.method, Method::Command);
        assert_eq!(config.command.as_deref(), Some("yadm list -a"));
    }

    #[test]
    fn symlink_method_requires_symlink_dir() {
        let err = from_str("[core]\nAPPS_DIR = apps\nMETHOD = symlink\n").unwrap_err();
        assert!(err.to_string().contains("SYMLINK_DIR"));
    }

    #[test]
    fn symlink_dir_resolves_against_home() {
        let config =
            from_str("[core]\nAPPS_DIR = apps\nMETHOD = symlink\nSYMLINK_DIR = dotfiles\n").unwrap();
        assert_eq!(
            config.managed_store_dir,
            Some(PathBuf::from("/home/user/dotfiles"))
        );
    }

    #[test]
    fn unknown_method_is_rejected() {
        let err = from_str("[core]\nAPPS_DIR = apps\nMETHOD = rsync\n").unwrap_err();
        assert!(matches!(
            err,
            StatusError::Validation(ValidationError::UnknownMethod(ref m)) if m == "rsync"
        ));
    }

    #[test]
    fn missing_core_section_is_config_error() {
        let err = from_str("[other]\nx\n").unwrap_err();
        assert!(matches!(
            err,
            StatusError::Config(ConfigError::MissingSection { .. })
        ));
    }

    #[test]
    fn missing_apps_dir_is_config_error() {
        let err = from_str("[core]\nMETHOD = base\n").unwrap_err();
        assert!(matches!(
            err,
            StatusError::Config(ConfigError::MissingOption { .. })
        ));
    }

    #[test]
    fn ignore_paths_are_full_matches() {
        let config = from_str("[core]\nAPPS_DIR = apps\n[ignore_paths]\n.*\\.swp\n.cache\n").unwrap();
        assert_eq!(config.ignore.len(), 2);
        assert!(config.ignore.is_ignored(".vimrc.swp"));
        assert!(config.ignore.is_ignored(".cache"));
        assert!(!config.ignore.is_ignored(".cache/x"));
        assert!(!config.ignore.is_ignored("x.swp.bak"));
    }

    #[test]
    fn invalid_ignore_pattern_is_rejected() {
        let err = from_str("[core]\nAPPS_DIR = apps\n[ignore_paths]\n(unclosed\n").unwrap_err();
        assert!(matches!(
            err,
            StatusError::Validation(ValidationError::InvalidIgnorePattern { .. })
        ));
    }

    #[test]
    fn load_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = Configuration::load(&dir.path().join("none.cfg"), dir.path(), &env()).unwrap_err();
        assert!(matches!(err, StatusError::Config(ConfigError::NotFound { .. })));
    }

    #[test]
    fn method_round_trips_through_display() {
        for method in [Method::Base, Method::Command, Method::Symlink] {
            assert_eq!(method.to_string().parse::<Method>().unwrap(), method);
        }
    }

    #[test]
    fn parse_backed_up_trims_and_skips_blank_lines() {
        let set = parse_backed_up(".vimrc  \n\n.config/git/config\r\n");
        assert_eq!(set.len(), 2);
        assert!(set.contains(".vimrc"));
        assert!(set.contains(".config/git/config"));
    }

    #[test]
    fn apps_dirs_skip_empty_entries() {
        let dirs = resolve_apps_dirs("a,, b ,", Path::new("/x"));
        assert_eq!(dirs, vec![PathBuf::from("/x/a"), PathBuf::from("/x/b")]);
    }
}
