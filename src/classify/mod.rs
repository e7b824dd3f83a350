//! Per-file status classifiers.
//!
//! A classifier looks at one home-relative path and either decides its
//! [`FileStatus`] or has no opinion, in which case the scan records
//! [`FileStatus::NotExists`]. The variant is chosen by
//! [`Configuration::method`](crate::config::Configuration::method):
//!
//! - **[`BaseClassifier`]**: anything present at home is backup-able
//! - **[`CommandClassifier`]**: an inventory command lists tracked files
//! - **[`SymlinkClassifier`]**: home entries should be symlinks into a store
pub mod base;
pub mod command;
pub mod helpers;
pub mod symlink;

pub use base::BaseClassifier;
pub use command::CommandClassifier;
pub use symlink::SymlinkClassifier;

use crate::config::{Configuration, Method};
use crate::environment::Environment;
use crate::error::{StatusError, ValidationError};
use crate::exec::Executor;
use crate::status::FileStatus;

/// Decides the status of a single home-relative file.
///
/// Implementations hold no per-call mutable state; anything expensive is done
/// once at construction.
#[cfg_attr(test, mockall::automock)]
pub trait StatusClassifier {
    /// Short name used in log output.
    fn name(&self) -> &'static str;

    /// Classify `file`, or return `None` for "no opinion".
    fn get_status(&self, file: &str) -> Option<FileStatus>;
}

/// Build the classifier selected by `config.method`.
///
/// The command classifier runs its inventory command here, exactly once.
///
/// # Errors
///
/// Returns [`ValidationError::MissingMethodOption`] if the method-specific
/// option is absent, or a command error if the inventory command cannot be
/// started.
pub fn build(
    config: &Configuration,
    env: &Environment,
    executor: &dyn Executor,
) -> Result<Box<dyn StatusClassifier>, StatusError> {
    let missing = |option: &str| ValidationError::MissingMethodOption {
        method: config.method.to_string(),
        option: option.to_string(),
    };

    let classifier: Box<dyn StatusClassifier> = match config.method {
        Method::Base => Box::new(BaseClassifier::new(env.home.clone())),
        Method::Command => {
            let command = config.command.as_deref().ok_or_else(|| missing("COMMAND"))?;
            Box::new(CommandClassifier::new(env.home.clone(), command, executor)?)
        }
        Method::Symlink => {
            let store = config
                .managed_store_dir
                .clone()
                .ok_or_else(|| missing("SYMLINK_DIR"))?;
            Box::new(SymlinkClassifier::new(env.home.clone(), store))
        }
    };
    Ok(classifier)
}
