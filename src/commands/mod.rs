//! Top-level subcommand orchestration and the shared setup sequence.
pub mod list;
pub mod status;
pub mod version;

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};

use crate::apps::ApplicationDatabase;
use crate::config::Configuration;
use crate::environment::Environment;
use crate::logging::Logger;

/// File name of the main configuration, looked up beside the executable.
pub const DEFAULT_CONFIG_FILE: &str = "dotstatus.cfg";

/// Shared state produced by the common command setup sequence.
///
/// Captures the environment and loads the main configuration and the
/// application database so that each command does not repeat it.
#[derive(Debug)]
pub struct StatusSetup {
    /// Home and XDG directories captured at startup.
    pub env: Environment,
    /// The main configuration.
    pub config: Configuration,
    /// Every known application.
    pub db: ApplicationDatabase,
}

impl StatusSetup {
    /// Read the environment, then load the configuration at `config_path`
    /// (or [`DEFAULT_CONFIG_FILE`] beside the executable).
    ///
    /// # Errors
    ///
    /// Returns an error if `HOME` is unset, the executable location cannot be
    /// determined, or loading fails (see [`StatusSetup::load`]).
    pub fn init(config_path: Option<&Path>, log: &Logger) -> Result<Self> {
        let env = Environment::from_env().context("reading environment")?;
        let base_dir = executable_dir()?;
        let config_path =
            config_path.map_or_else(|| base_dir.join(DEFAULT_CONFIG_FILE), Path::to_path_buf);
        Self::load(&config_path, &base_dir, env, log)
    }

    /// Load the configuration at `config_path` and every application
    /// descriptor it points at.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file is missing or invalid, an
    /// application directory cannot be read, a descriptor is invalid, or
    /// `XDG_CONFIG_HOME` is set but unusable.
    pub fn load(config_path: &Path, base_dir: &Path, env: Environment, log: &Logger) -> Result<Self> {
        log.stage("Loading configuration");
        if let Some(path) = log.log_path() {
            log.debug(&format!("log file: {}", path.display()));
        }
        log.debug(&format!("config file: {}", config_path.display()));
        let config = Configuration::load(config_path, base_dir, &env).with_context(|| {
            format!("loading configuration from {}", config_path.display())
        })?;
        log.debug(&format!("method: {}", config.method));
        log.debug(&format!("{} ignore pattern(s)", config.ignore.len()));

        log.stage("Loading application database");
        let db = ApplicationDatabase::load(&config.apps_dirs, &env)
            .context("loading application descriptors")?;
        log.info(&format!(
            "loaded {} application(s) from {} director{}",
            db.len(),
            config.apps_dirs.len(),
            if config.apps_dirs.len() == 1 { "y" } else { "ies" }
        ));

        Ok(Self { env, config, db })
    }
}

/// Directory containing the running executable, with symlinks resolved.
///
/// # Errors
///
/// Returns an error if the executable path cannot be determined.
pub fn executable_dir() -> Result<PathBuf> {
    let exe = std::env::current_exe().context("locating the running executable")?;
    let exe = dunce::canonicalize(&exe).unwrap_or(exe);
    exe.parent()
        .map(Path::to_path_buf)
        .context("executable has no parent directory")
}
