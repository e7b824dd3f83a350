//! Pattern expansion, classification and per-application rollup.
use std::collections::BTreeSet;
use std::path::Path;

use glob::{MatchOptions, Pattern};
use tracing::debug;

use crate::apps::ApplicationDatabase;
use crate::classify::StatusClassifier;
use crate::config::Configuration;
use crate::status::{ClassificationResult, FileStatus};

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: true,
};

/// Expand one home-relative glob pattern into existing home-relative paths.
///
/// Dangling symlinks are included; a literal pattern naming a missing path
/// yields nothing. `**` behaves like `*`, and a `[` with no closing `]` in
/// the same component is an ordinary character. Matches keep the pattern's
/// own spelling of the home-relative prefix, so `./app/*` yields `./app/conf`.
#[must_use]
pub fn expand_pattern(home: &Path, pattern: &str) -> Vec<String> {
    if !has_glob_meta(pattern) {
        return expand_literal(home, pattern);
    }

    let home_str = home.to_string_lossy();
    let home_str = home_str.trim_end_matches('/');
    let full = format!("{}/{}", Pattern::escape(home_str), glob_syntax(pattern));

    let paths = match glob::glob_with(&full, MATCH_OPTIONS) {
        Ok(paths) => paths,
        Err(e) => {
            debug!("'{pattern}' is not a valid glob ({e}), matching it literally");
            return expand_literal(home, pattern);
        }
    };

    let prefix = format!("{home_str}/");
    paths
        .filter_map(|entry| match entry {
            Ok(path) => home_relative(&path, home, &prefix),
            Err(e) => {
                debug!("skipping unreadable entry while expanding '{pattern}': {e}");
                None
            }
        })
        .filter(|rel| !rel.is_empty())
        .collect()
}

fn expand_literal(home: &Path, pattern: &str) -> Vec<String> {
    if std::fs::symlink_metadata(home.join(pattern)).is_ok() {
        vec![pattern.to_string()]
    } else {
        Vec::new()
    }
}

fn home_relative(path: &Path, home: &Path, prefix: &str) -> Option<String> {
    if let Some(rel) = path.to_string_lossy().strip_prefix(prefix) {
        return Some(rel.to_string());
    }
    path.strip_prefix(home)
        .ok()
        .map(|rel| rel.to_string_lossy().into_owned())
}

fn has_glob_meta(pattern: &str) -> bool {
    pattern.contains(['*', '?', '['])
}

/// Rewrite `pattern` so the `glob` crate reads it the shell's way.
///
/// Runs of `*` collapse to one, so `**` never recurses. A `[` that opens no
/// complete character class within its path component is escaped as `[[]`.
fn glob_syntax(pattern: &str) -> String {
    let chars: Vec<char> = pattern.chars().collect();
    let mut out = String::with_capacity(pattern.len());
    let mut i = 0;

    while let Some(&c) = chars.get(i) {
        match c {
            '*' => {
                out.push('*');
                while chars.get(i + 1) == Some(&'*') {
                    i += 1;
                }
            }
            '[' => {
                let end = class_end(&chars, i).unwrap_or(i);
                if end > i {
                    out.extend(chars.get(i..=end).unwrap_or_default());
                    i = end;
                } else {
                    out.push_str("[[]");
                }
            }
            _ => out.push(c),
        }
        i += 1;
    }

    out
}

/// Index of the `]` closing the class opened at `start`, if any.
///
/// A leading `!` negates the class and a `]` right after the opening (or
/// after `!`) is a member, not the terminator.
fn class_end(chars: &[char], start: usize) -> Option<usize> {
    let mut j = start + 1;
    if chars.get(j) == Some(&'!') {
        j += 1;
    }
    if chars.get(j) == Some(&']') {
        j += 1;
    }
    while let Some(&c) = chars.get(j) {
        match c {
            ']' => return Some(j),
            '/' => return None,
            _ => j += 1,
        }
    }
    None
}

/// Expand every pattern and classify each concrete path.
///
/// For each expanded path, in priority order:
/// 1. paths fully matching an ignore pattern are dropped;
/// 2. paths listed in `externally_backed_up` are [`FileStatus::Exists`]
///    without consulting the classifier;
/// 3. otherwise the classifier decides, defaulting to
///    [`FileStatus::NotExists`] when it has no opinion.
///
/// A pattern that expands to nothing contributes no entry.
pub fn expand_and_classify<'a>(
    patterns: impl IntoIterator<Item = &'a String>,
    config: &Configuration,
    classifier: &dyn StatusClassifier,
    home: &Path,
) -> Vec<ClassificationResult> {
    let mut results = Vec::new();

    for pattern in patterns {
        for path in expand_pattern(home, pattern) {
            if config.ignore.is_ignored(&path) {
                debug!("ignoring {path}");
                continue;
            }

            let status = if config.externally_backed_up.contains(&path) {
                FileStatus::Exists
            } else {
                classifier
                    .get_status(&path)
                    .unwrap_or(FileStatus::NotExists)
            };

            results.push(ClassificationResult::new(status, path));
        }
    }

    results
}

/// The classified files of one application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppReport {
    /// Application id.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Results sorted by `(status, path)`.
    pub results: Vec<ClassificationResult>,
}

impl AppReport {
    /// Create a report, sorting `results` into display order.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        mut results: Vec<ClassificationResult>,
    ) -> Self {
        results.sort();
        Self {
            id: id.into(),
            name: name.into(),
            results,
        }
    }

    /// Whether the application appears absent from this machine.
    ///
    /// True when every result is [`FileStatus::NotExists`], including when
    /// there are no results at all.
    #[must_use]
    pub fn is_not_installed(&self) -> bool {
        is_not_installed(&self.results)
    }

    /// Count of results with `status`.
    #[must_use]
    pub fn count(&self, status: FileStatus) -> usize {
        self.results.iter().filter(|r| r.status == status).count()
    }
}

/// Return `true` if every entry is [`FileStatus::NotExists`].
#[must_use]
pub fn is_not_installed(results: &[ClassificationResult]) -> bool {
    results.iter().all(|r| r.status == FileStatus::NotExists)
}

/// Which applications to scan.
#[derive(Debug, Clone, Default)]
pub struct AppSelection {
    /// When non-empty, only these ids are scanned.
    pub only: BTreeSet<String>,
    /// Ids never scanned.
    pub skip: BTreeSet<String>,
}

impl AppSelection {
    /// Return `true` if application `id` should be scanned.
    #[must_use]
    pub fn includes(&self, id: &str) -> bool {
        (self.only.is_empty() || self.only.contains(id)) && !self.skip.contains(id)
    }
}

/// Scan every selected application, in id order.
pub fn scan_applications(
    db: &ApplicationDatabase,
    config: &Configuration,
    classifier: &dyn StatusClassifier,
    home: &Path,
    selection: &AppSelection,
) -> Vec<AppReport> {
    db.iter()
        .filter(|app| selection.includes(&app.id))
        .map(|app| {
            let results = expand_and_classify(&app.file_patterns, config, classifier, home);
            debug!(
                "{}: {} entries via {} classifier",
                app.id,
                results.len(),
                classifier.name()
            );
            AppReport::new(app.id.clone(), app.display_name.clone(), results)
        })
        .collect()
}
