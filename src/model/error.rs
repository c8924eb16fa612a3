//! Error types for storystrip.
//!
//! The engine is purely computational, so its own error surface is small:
//! caller contract violations are reported as [`StripError`] instead of
//! producing NaN ratios or zero-pitch divisions. Everything that touches
//! the outside world (config files, content files, the terminal) has its
//! own error type in the module that owns that boundary, and [`AppError`]
//! unifies them for the binary.
//!
//! # Error Hierarchy
//!
//! - [`AppError`] - Top-level error returned from `main`
//!   - [`crate::config::ConfigError`] - config file read/parse/validation failures
//!   - [`crate::source::SourceError`] - content snapshot loading failures
//!   - [`crate::logging::LoggingError`] - tracing subscriber setup failures
//!   - [`StripError`] - engine contract violations
//!   - [`crate::view::TuiError`] - terminal preview failures
//!   - `std::io::Error` - terminal setup failures
//!
//! # Recovery Strategy
//!
//! Contract violations are non-fatal: the engine logs them with
//! `tracing::error!`, leaves its state untouched and hands the error back.
//! Out-of-range interaction (a pointer outside every item) is never an
//! error; it resolves to "no selection".

use thiserror::Error;

/// Top-level application error encompassing all failure modes.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded or failed validation.
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    /// Content snapshot could not be loaded.
    #[error("Content error: {0}")]
    Source(#[from] crate::source::SourceError),

    /// Logging could not be initialized.
    #[error("Logging error: {0}")]
    Logging(#[from] crate::logging::LoggingError),

    /// The engine rejected a caller contract violation.
    #[error("Strip error: {0}")]
    Strip(#[from] StripError),

    /// The terminal preview failed.
    #[error("Preview error: {0}")]
    Preview(#[from] crate::view::TuiError),

    /// Terminal or rendering error.
    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}

/// Caller contract violations detected by the strip engine.
///
/// # Examples
///
/// ```
/// use storystrip::model::error::StripError;
///
/// let err = StripError::ZeroCapacity { expanding_height: 12 };
/// assert!(err.to_string().contains("12"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StripError {
    /// A nonzero expanding height was reported against zero capacity.
    ///
    /// The expansion ratio would be infinite, so the update is rejected and
    /// the previous ratio is kept.
    #[error("expanding height {expanding_height} reported with zero expanded capacity")]
    ZeroCapacity {
        /// The offending expanding height.
        expanding_height: i32,
    },

    /// A style metric that must be positive was not.
    ///
    /// Item pitch divides pointer coordinates during hit-testing, so a
    /// non-positive photo size would divide by zero.
    #[error("style metric '{name}' must be positive (got {value})")]
    NonPositiveMetric {
        /// Name of the metric, as written in the config file.
        name: &'static str,
        /// The rejected value.
        value: i32,
    },
}
