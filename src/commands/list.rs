//! Command: print the application database.
use std::fmt::Write as _;
use std::io::{self, Write as _};
use std::path::Path;

use anyhow::{Context as _, Result};

use super::StatusSetup;
use crate::apps::ApplicationDatabase;
use crate::logging::Logger;

/// Run the `list` command.
///
/// # Errors
///
/// Returns an error if setup fails or the listing cannot be written.
pub fn run(config_path: Option<&Path>, log: &Logger) -> Result<()> {
    let setup = StatusSetup::init(config_path, log)?;
    let mut stdout = io::stdout().lock();
    stdout
        .write_all(render_list(&setup.db).as_bytes())
        .context("writing application list")?;
    Ok(())
}

/// One block per application: `id (Display Name)` followed by its
/// patterns, indented, in sorted order.
#[must_use]
pub fn render_list(db: &ApplicationDatabase) -> String {
    let mut out = String::new();
    for app in db.iter() {
        let _ = writeln!(out, "{} ({})", app.id, app.display_name);
        for pattern in &app.file_patterns {
            let _ = writeln!(out, "    {pattern}");
        }
    }
    out
}
