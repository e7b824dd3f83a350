//! Dotfiles backup status reporter.
//!
//! Scans per-application descriptor files listing configuration file
//! patterns, expands them against the home directory, and reports which
//! files are backed up, backup-able, missing or broken according to one of
//! three strategies: plain presence, an external inventory command, or a
//! symlink farm.
//!
//! The public API is organised in layers:
//!
//! - **[`config`]** and **[`apps`]**: the main configuration and the
//!   application database
//! - **[`classify`]**: the pluggable per-file status strategies
//! - **[`scan`]** and **[`report`]**: pattern expansion, rollup and rendering
//! - **[`commands`]**: top-level subcommand orchestration (`status`, `list`)
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod apps;
pub mod classify;
pub mod cli;
pub mod commands;
pub mod config;
pub mod environment;
pub mod error;
pub mod exec;
pub mod logging;
pub mod report;
pub mod scan;
pub mod status;
