//! Command-line interface definitions.
use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

/// Top-level CLI entry point for the dotfiles status reporter.
#[derive(Parser, Debug)]
#[command(
    name = "dotstatus",
    about = "Report which application config files are backed up",
    version
)]
pub struct Cli {
    /// The subcommand to run.
    #[command(subcommand)]
    pub command: Command,

    /// Main configuration file (default: dotstatus.cfg next to the executable)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Print diagnostic output to stderr
    #[arg(long, global = true)]
    pub debug: bool,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Classify every known application's config files
    Status(StatusOpts),
    /// List the application database
    List,
    /// Print version information
    Version,
}

/// Options for the `status` subcommand.
#[derive(Parser, Debug, Clone, Default)]
pub struct StatusOpts {
    /// Show more entries (-v backed up, -vv missing, -vvv uninstalled apps)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Print only backup-able paths, one per line
    #[arg(short, long)]
    pub minimal: bool,

    /// Check only these application ids
    #[arg(long, value_delimiter = ',')]
    pub only: Vec<String>,

    /// Skip these application ids
    #[arg(long, value_delimiter = ',')]
    pub skip: Vec<String>,
}

impl Command {
    /// Short name used for the log file.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Status(_) => "status",
            Self::List => "list",
            Self::Version => "version",
        }
    }
}
