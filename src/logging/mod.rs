//! File logging for the preview.
//!
//! The preview owns the terminal, so tracing output goes to a file; follow
//! it with `tail -f` from a second terminal.
//!
//! # Targets
//! - `storystrip::strip::expansion`: strip state changes and expand/collapse
//!   requests, plus rejected heights without capacity
//! - `storystrip::strip::item_store`: snapshot reconciliation and duplicate ids
//! - `storystrip::strip::list`: clicks and load-more requests
//! - `storystrip::strip::drag`: drag start and end
//! - `storystrip::view::host`: the host height following the strip
//!
//! Engine events sit at debug level, so
//! `RUST_LOG=storystrip::strip::expansion=debug` shows every state change
//! without the per-frame noise of the other targets.

use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Directives used when `RUST_LOG` is unset or unparsable.
pub const DEFAULT_FILTER: &str = "info";

/// Failure to set up the log file subscriber.
#[derive(Debug, Error)]
pub enum LoggingError {
    /// Log directory could not be created.
    #[error("Failed to create log directory at {path:?}: {source}")]
    DirectoryCreation {
        /// Directory that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Log path ends without a file name.
    #[error("Invalid log file path: {0:?}")]
    InvalidPath(PathBuf),

    /// A global subscriber is already installed.
    #[error("Tracing subscriber already initialized")]
    SubscriberAlreadySet,
}

/// Build the filter from raw `RUST_LOG` directives.
///
/// Missing or invalid directives fall back to [`DEFAULT_FILTER`].
pub fn env_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|raw| EnvFilter::try_new(raw).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}

/// Split a log path into its directory and file name.
///
/// A bare file name logs into the working directory.
fn split_log_path(log_path: &Path) -> Result<(&Path, &str), LoggingError> {
    let file_name = log_path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| LoggingError::InvalidPath(log_path.to_path_buf()))?;
    let directory = match log_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    Ok((directory, file_name))
}

/// Install the global subscriber writing to `log_path`.
///
/// Creates the log directory first, so the file exists even when another
/// subscriber already won the race.
///
/// # Errors
/// Returns [`LoggingError`] if the path has no file name, the directory
/// cannot be created, or a subscriber is already installed.
pub fn init(log_path: &Path) -> Result<(), LoggingError> {
    let (directory, file_name) = split_log_path(log_path)?;
    std::fs::create_dir_all(directory).map_err(|source| LoggingError::DirectoryCreation {
        path: directory.to_path_buf(),
        source,
    })?;

    let directives = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(directives.as_deref()))
        .with_writer(tracing_appender::rolling::never(directory, file_name))
        .with_ansi(false)
        .try_init()
        .map_err(|_| LoggingError::SubscriberAlreadySet)?;

    tracing::info!(path = %log_path.display(), "storystrip logging started");
    Ok(())
}
