//! Process environment captured once at startup.
use std::path::{Path, PathBuf};

use crate::error::ValidationError;

/// The environment variables every path resolution depends on.
///
/// Captured once by [`Environment::from_env`] and handed explicitly to every
/// component, so nothing below the CLI layer reads process-wide state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Environment {
    /// `$HOME`; base for all relative file patterns.
    pub home: PathBuf,
    /// `$XDG_CONFIG_HOME`, when set to a non-empty value.
    pub xdg_config_home: Option<PathBuf>,
}

impl Environment {
    /// Create an environment with explicit values.
    #[must_use]
    pub fn new(home: impl Into<PathBuf>, xdg_config_home: Option<PathBuf>) -> Self {
        Self {
            home: home.into(),
            xdg_config_home,
        }
    }

    /// Read `HOME` and `XDG_CONFIG_HOME` from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::HomeNotSet`] if `HOME` is unset or empty.
    pub fn from_env() -> Result<Self, ValidationError> {
        let home = std::env::var_os("HOME")
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .ok_or(ValidationError::HomeNotSet)?;
        let xdg_config_home = std::env::var_os("XDG_CONFIG_HOME")
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);
        Ok(Self::new(home, xdg_config_home))
    }

    /// Join a home-relative path onto the home directory.
    #[must_use]
    pub fn home_path(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.home.join(relative)
    }

    /// Validate `XDG_CONFIG_HOME` and return it, or `None` when unset.
    ///
    /// The directory must exist and lie strictly inside the home directory,
    /// so that XDG-scoped patterns can be re-expressed relative to home.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::XdgConfigHomeMissing`] or
    /// [`ValidationError::XdgConfigHomeOutsideHome`].
    pub fn validated_xdg_config_home(&self) -> Result<Option<&Path>, ValidationError> {
        let Some(xdg) = self.xdg_config_home.as_deref() else {
            return Ok(None);
        };
        if !xdg.exists() {
            return Err(ValidationError::XdgConfigHomeMissing(xdg.to_path_buf()));
        }
        if xdg == self.home || !xdg.starts_with(&self.home) {
            return Err(ValidationError::XdgConfigHomeOutsideHome {
                xdg: xdg.to_path_buf(),
                home: self.home.clone(),
            });
        }
        Ok(Some(xdg))
    }
}
