//! Domain-specific error types for the status engine.
//!
//! Internal modules return typed errors (e.g., [`ConfigError`],
//! [`ValidationError`]) while command handlers at the CLI boundary convert
//! them to [`anyhow::Error`] via the standard `?` operator.
//!
//! # Error hierarchy
//!
//! ```text
//! StatusError
//! ├── Config(ConfigError)         — main config / descriptor I/O and syntax
//! ├── Validation(ValidationError) — invalid values, paths and environment
//! └── Command(CommandError)       — external inventory command invocation
//! ```
//!
//! A classifier returning "no opinion" for a file is not an error: it is the
//! common case for files that were never installed.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for the status engine.
#[derive(Error, Debug)]
pub enum StatusError {
    /// Configuration-related error (missing file, I/O, syntax).
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A configured value, descriptor or environment variable is invalid.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The external inventory command could not be run.
    #[error("Command error: {0}")]
    Command(#[from] CommandError),
}

/// Errors that arise while reading configuration and descriptor files.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file does not exist.
    #[error("Failed to read config file '{}': no such file", .path.display())]
    NotFound {
        /// Path that was looked up.
        path: PathBuf,
    },

    /// An I/O error occurred while reading a file or listing a directory.
    #[error("IO error reading {}: {source}", .path.display())]
    Io {
        /// Path to the file or directory that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The INI content contains a syntax error.
    #[error("Invalid INI syntax in {file} at line {line}: {message}")]
    InvalidSyntax {
        /// Name of the offending file.
        file: String,
        /// One-based line number.
        line: usize,
        /// Human-readable description.
        message: String,
    },

    /// A required section is absent.
    #[error("Missing required section [{section}] in {file}")]
    MissingSection {
        /// Name of the offending file.
        file: String,
        /// Section name.
        section: String,
    },

    /// A required option is absent from a section.
    #[error("Missing required option '{option}' in section [{section}] of {file}")]
    MissingOption {
        /// Name of the offending file.
        file: String,
        /// Section name.
        section: String,
        /// Option name.
        option: String,
    },
}

/// Errors raised when a loaded value is not acceptable.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// A descriptor declares an absolute file pattern.
    #[error("Unsupported absolute path in {descriptor}: {path}")]
    AbsolutePath {
        /// Descriptor the pattern was declared in.
        descriptor: String,
        /// The offending pattern.
        path: String,
    },

    /// `METHOD` names no known classification method.
    #[error("Unrecognised method: {0}")]
    UnknownMethod(String),

    /// The option required by the chosen method is absent.
    #[error("Method '{method}' requires option '{option}' in section [core]")]
    MissingMethodOption {
        /// The chosen method.
        method: String,
        /// The missing option.
        option: String,
    },

    /// An `[ignore_paths]` entry is not a valid regular expression.
    #[error("Invalid ignore pattern '{pattern}': {message}")]
    InvalidIgnorePattern {
        /// The offending pattern.
        pattern: String,
        /// Compiler message.
        message: String,
    },

    /// `XDG_CONFIG_HOME` is set but does not exist.
    #[error("$XDG_CONFIG_HOME: {} does not exist", .0.display())]
    XdgConfigHomeMissing(PathBuf),

    /// `XDG_CONFIG_HOME` is set but not located under the home directory.
    #[error(
        "$XDG_CONFIG_HOME: {} must be somewhere within your home directory: {}",
        .xdg.display(),
        .home.display()
    )]
    XdgConfigHomeOutsideHome {
        /// Value of `XDG_CONFIG_HOME`.
        xdg: PathBuf,
        /// The home directory.
        home: PathBuf,
    },

    /// `HOME` is not set.
    #[error("$HOME is not set")]
    HomeNotSet,
}

/// Errors raised by the external inventory command.
#[derive(Error, Debug)]
pub enum CommandError {
    /// The command could not be spawned at all.
    #[error("failed to execute '{command}': {source}")]
    Spawn {
        /// The shell command line.
        command: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}
