//! Text rendering of scan results.
use std::fmt::Write as _;

use crate::scan::AppReport;
use crate::status::FileStatus;

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";

/// Verbosity at which `Backup-ed` entries are shown.
pub const SHOW_EXISTS: u8 = 1;
/// Verbosity at which `Not exists` entries are shown.
pub const SHOW_NOT_EXISTS: u8 = 2;
/// Verbosity at which applications that look uninstalled are shown.
pub const SHOW_NOT_INSTALLED: u8 = 3;

/// Width the status column is padded to.
const STATUS_WIDTH: usize = 22;
/// Width the path column is padded to.
const PATH_WIDTH: usize = 20;

/// How to render a report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportOptions {
    /// 0 shows only actionable entries; each level adds more.
    pub verbosity: u8,
    /// Print only backup-able paths, one per line, without headers.
    pub minimal: bool,
    /// Emit ANSI colours.
    pub color: bool,
}

const fn color_of(status: FileStatus) -> &'static str {
    match status {
        FileStatus::BackupAble => "\x1b[0;32m",
        FileStatus::Exists => "\x1b[1;34m",
        FileStatus::NotExists => "\x1b[0;35m",
        FileStatus::NotInstalled => "\x1b[0;33m",
        FileStatus::BrokenLink => "\x1b[1;31m",
    }
}

/// Whether an entry with `status` is shown at `verbosity`.
#[must_use]
pub const fn is_shown(status: FileStatus, verbosity: u8) -> bool {
    match status {
        FileStatus::BackupAble | FileStatus::BrokenLink => true,
        FileStatus::Exists => verbosity >= SHOW_EXISTS,
        FileStatus::NotExists | FileStatus::NotInstalled => verbosity >= SHOW_NOT_EXISTS,
    }
}

/// Render every application report.
///
/// Applications that look uninstalled are skipped below
/// [`SHOW_NOT_INSTALLED`]; when shown, each of their entries is relabelled
/// [`FileStatus::NotInstalled`]. An application whose entries are all
/// filtered out prints nothing, not even its header.
#[must_use]
pub fn render(reports: &[AppReport], opts: &ReportOptions) -> String {
    let mut out = String::new();

    for report in reports {
        let not_installed = report.is_not_installed();
        if not_installed && opts.verbosity < SHOW_NOT_INSTALLED {
            continue;
        }

        if opts.minimal {
            for result in &report.results {
                if result.status == FileStatus::BackupAble {
                    let _ = writeln!(out, "{}", result.path);
                }
            }
            continue;
        }

        let lines: Vec<String> = report
            .results
            .iter()
            .filter(|r| is_shown(r.status, opts.verbosity))
            .map(|r| {
                let status = if not_installed {
                    FileStatus::NotInstalled
                } else {
                    r.status
                };
                format_line(status, &r.path, opts.color)
            })
            .collect();

        if lines.is_empty() {
            continue;
        }

        if opts.color {
            let _ = writeln!(out, "[ {BOLD}{}{RESET} ]", report.name);
        } else {
            let _ = writeln!(out, "[ {} ]", report.name);
        }
        for line in lines {
            let _ = writeln!(out, "{line}");
        }
    }

    out
}

/// One ` >> status: path` line; both columns are padded before colouring.
fn format_line(status: FileStatus, path: &str, color: bool) -> String {
    let label = format!("{status:<STATUS_WIDTH$}");
    let path = format!("{path:<PATH_WIDTH$}");
    if color {
        let c = color_of(status);
        format!(" >> {c}{label}{RESET}: {c}{path}{RESET}")
    } else {
        format!(" >> {label}: {path}")
    }
}
