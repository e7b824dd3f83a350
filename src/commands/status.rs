//! Command: classify every application's config files and print the report.
use std::io::{self, BufRead as _, IsTerminal as _, Write as _};
use std::path::Path;

use anyhow::{Context as _, Result};

use super::StatusSetup;
use crate::classify;
use crate::cli::StatusOpts;
use crate::config::parse_backed_up;
use crate::exec::{Executor, SystemExecutor};
use crate::logging::Logger;
use crate::report::{self, ReportOptions};
use crate::scan::{AppSelection, scan_applications};
use crate::status::FileStatus;

/// Run the `status` command.
///
/// Paths piped on stdin are treated as already backed up.
///
/// # Errors
///
/// Returns an error if setup fails, the inventory command cannot be started,
/// stdin cannot be read, or the report cannot be written.
pub fn run(config_path: Option<&Path>, opts: &StatusOpts, log: &Logger) -> Result<()> {
    let mut setup = StatusSetup::init(config_path, log)?;

    let stdin = io::stdin();
    if !stdin.is_terminal() {
        log.debug("reading already backed-up paths from stdin");
        let input = stdin
            .lock()
            .lines()
            .collect::<io::Result<Vec<_>>>()
            .context("reading stdin")?
            .join("\n");
        setup.config.externally_backed_up = parse_backed_up(&input);
        log.debug(&format!(
            "{} path(s) marked as backed up",
            setup.config.externally_backed_up.len()
        ));
    }

    let color = io::stdout().is_terminal();
    let output = render_status(&mut setup, opts, &SystemExecutor, color, log)?;

    let mut stdout = io::stdout().lock();
    stdout
        .write_all(output.as_bytes())
        .and_then(|()| stdout.flush())
        .context("writing report")?;
    Ok(())
}

/// Build the classifier, scan the selected applications and render them.
///
/// # Errors
///
/// Returns an error if the classifier cannot be built.
pub fn render_status(
    setup: &mut StatusSetup,
    opts: &StatusOpts,
    executor: &dyn Executor,
    color: bool,
    log: &Logger,
) -> Result<String> {
    setup.config.verbosity = opts.verbose;

    let selection = AppSelection {
        only: opts.only.iter().cloned().collect(),
        skip: opts.skip.iter().cloned().collect(),
    };
    for id in selection.only.iter().chain(&selection.skip) {
        if setup.db.get(id).is_none() {
            log.warn(&format!("unknown application '{id}'"));
        }
    }

    log.stage(&format!("Building {} classifier", setup.config.method));
    let classifier = classify::build(&setup.config, &setup.env, executor)
        .context("building status classifier")?;

    log.stage("Scanning applications");
    let reports = scan_applications(
        &setup.db,
        &setup.config,
        classifier.as_ref(),
        &setup.env.home,
        &selection,
    );

    let backup_able: usize = reports.iter().map(|r| r.count(FileStatus::BackupAble)).sum();
    let broken: usize = reports.iter().map(|r| r.count(FileStatus::BrokenLink)).sum();
    log.info(&format!(
        "scanned {} application(s): {backup_able} backup-able, {broken} broken link(s)",
        reports.len()
    ));

    Ok(report::render(
        &reports,
        &ReportOptions {
            verbosity: setup.config.verbosity,
            minimal: opts.minimal,
            color,
        },
    ))
}
