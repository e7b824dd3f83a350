//! `dotstatus` binary: parses arguments and dispatches to a subcommand.
use anyhow::Result;
use clap::Parser;
use std::io::IsTerminal as _;

use dotfiles_status::{cli, commands, logging};

fn main() -> Result<()> {
    let _ = enable_ansi_support::enable_ansi_support();
    let args = cli::Cli::parse();

    let command = args.command.name();
    logging::init_subscriber(args.debug, std::io::stderr().is_terminal(), command);
    let log = logging::Logger::new(command);

    let config = args.config.as_deref();
    match &args.command {
        cli::Command::Status(opts) => commands::status::run(config, opts, &log),
        cli::Command::List => commands::list::run(config, &log),
        cli::Command::Version => commands::version::run(),
    }
}
