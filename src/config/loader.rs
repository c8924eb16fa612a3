//! Configuration file loading with precedence handling.

use crate::model::StripError;
use crate::strip::{StripConfig, StripStyle};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "STORYSTRIP_CONFIG";
/// Environment variable forcing right-to-left scrolling.
pub const RTL_ENV: &str = "STORYSTRIP_RTL";
/// Environment variable making the trailing region always clickable.
pub const FULL_CLICKABLE_ENV: &str = "STORYSTRIP_FULL_CLICKABLE";

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Failed to read config file (file may not exist or have permission issues).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML syntax.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },

    /// A tunable is outside its allowed range.
    #[error("Invalid value for {field}: {reason}")]
    InvalidValue {
        /// Config key.
        field: &'static str,
        /// What is wrong with it.
        reason: String,
    },

    /// Style metrics are unusable.
    #[error("Invalid style: {0}")]
    Style(#[from] StripError),
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/storystrip/config.toml`.
///
/// ```toml
/// expand_after_ratio = 0.8
/// full_clickable = true
///
/// [style.full]
/// photo = 10
/// ```
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Maximum circles in the compact row.
    #[serde(default)]
    pub small_thumbs_shown: Option<i32>,

    /// Viewport widths left to scroll before more content is requested.
    #[serde(default)]
    pub preload_pages: Option<i32>,

    /// Growing ratio above which the strip expands.
    #[serde(default)]
    pub expand_after_ratio: Option<f64>,

    /// Shrinking ratio below which the strip collapses.
    #[serde(default)]
    pub collapse_after_ratio: Option<f64>,

    /// Damping of the compact share of the blended ratio.
    #[serde(default)]
    pub friction_ratio: Option<f64>,

    /// Momentum catch-up duration in milliseconds.
    #[serde(default)]
    pub expand_catch_up_ms: Option<u64>,

    /// Expand/collapse animation duration in milliseconds.
    #[serde(default)]
    pub expand_duration_ms: Option<u64>,

    /// Whether the region past the last visible slot selects it.
    #[serde(default)]
    pub full_clickable: Option<bool>,

    /// Pointer travel before a press becomes a drag.
    #[serde(default)]
    pub drag_distance: Option<i32>,

    /// Mirror horizontal scroll directions.
    #[serde(default)]
    pub right_to_left: Option<bool>,

    /// Frame timer interval of the terminal preview in milliseconds.
    #[serde(default)]
    pub frame_ms: Option<u64>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,

    /// Style metrics; missing keys keep their defaults.
    #[serde(default)]
    pub style: Option<StripStyle>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    /// Engine tunables.
    pub strip: StripConfig,
    /// Style metrics.
    pub style: StripStyle,
    /// Frame timer interval.
    pub frame_interval: Duration,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            strip: StripConfig::default(),
            style: StripStyle::default(),
            frame_interval: Duration::from_millis(16),
            log_file_path: default_log_path(),
        }
    }
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/storystrip/storystrip.log` on Unix-like systems,
/// or appropriate platform path on other systems.
///
/// If state directory cannot be determined, falls back to current directory.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("storystrip").join("storystrip.log")
    } else {
        PathBuf::from("storystrip.log")
    }
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if file doesn't exist (not an error - use defaults).
///
/// # Errors
///
/// Returns error if file exists but has read or parse errors.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    // Missing file is not an error - use defaults
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

/// Resolve default config file path.
///
/// Returns `~/.config/storystrip/config.toml` on Unix, appropriate path on
/// other platforms. Returns `None` if home directory cannot be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("storystrip").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `STORYSTRIP_CONFIG` environment variable
/// 3. Default path `~/.config/storystrip/config.toml`
///
/// Missing config files are NOT errors - defaults are used.
///
/// # Errors
///
/// Returns error only if a config file exists but cannot be read or parsed.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Ok(env_path) = std::env::var(CONFIG_ENV) {
        return load_config_file(PathBuf::from(env_path));
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

fn parse_flag(variable: &str, value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        other => {
            tracing::warn!(variable, value = other, "Ignoring unrecognized boolean env value");
            None
        }
    }
}

/// Apply environment variable overrides to resolved config.
///
/// Checks for:
/// - `STORYSTRIP_RTL`: right-to-left scrolling
/// - `STORYSTRIP_FULL_CLICKABLE`: trailing region selects the last slot
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Some(rtl) = std::env::var(RTL_ENV)
        .ok()
        .and_then(|v| parse_flag(RTL_ENV, &v))
    {
        config.strip.right_to_left = rtl;
    }

    if let Some(clickable) = std::env::var(FULL_CLICKABLE_ENV)
        .ok()
        .and_then(|v| parse_flag(FULL_CLICKABLE_ENV, &v))
    {
        config.strip.full_clickable = clickable;
    }

    config
}

/// Merge config file into defaults to create resolved config.
///
/// For each field in `ConfigFile`, if `Some(value)`, use it; otherwise use default.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };
    let strip = defaults.strip;

    ResolvedConfig {
        strip: StripConfig {
            small_thumbs_shown: config
                .small_thumbs_shown
                .unwrap_or(strip.small_thumbs_shown),
            preload_pages: config.preload_pages.unwrap_or(strip.preload_pages),
            expand_after_ratio: config
                .expand_after_ratio
                .unwrap_or(strip.expand_after_ratio),
            collapse_after_ratio: config
                .collapse_after_ratio
                .unwrap_or(strip.collapse_after_ratio),
            friction_ratio: config.friction_ratio.unwrap_or(strip.friction_ratio),
            expand_catch_up_duration: config
                .expand_catch_up_ms
                .map_or(strip.expand_catch_up_duration, Duration::from_millis),
            expand_duration: config
                .expand_duration_ms
                .map_or(strip.expand_duration, Duration::from_millis),
            full_clickable: config.full_clickable.unwrap_or(strip.full_clickable),
            drag_distance: config.drag_distance.unwrap_or(strip.drag_distance),
            right_to_left: config.right_to_left.unwrap_or(strip.right_to_left),
        },
        style: config.style.unwrap_or(defaults.style),
        frame_interval: config
            .frame_ms
            .map_or(defaults.frame_interval, Duration::from_millis),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
    }
}

/// Apply CLI argument overrides to resolved config.
///
/// CLI args have the highest precedence and override all other sources.
/// Only applies overrides for flags that were explicitly set by the user.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
pub fn apply_cli_overrides(
    mut config: ResolvedConfig,
    rtl_override: Option<bool>,
    full_clickable_override: Option<bool>,
) -> ResolvedConfig {
    if let Some(rtl) = rtl_override {
        config.strip.right_to_left = rtl;
    }

    if let Some(clickable) = full_clickable_override {
        config.strip.full_clickable = clickable;
    }

    config
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::InvalidValue {
        field,
        reason: reason.into(),
    }
}

/// Check the resolved tunables against their allowed ranges.
///
/// # Errors
///
/// Returns the first out-of-range value found.
pub fn validate(config: &ResolvedConfig) -> Result<(), ConfigError> {
    let strip = &config.strip;
    let unit = 0.0..=1.0;
    if !unit.contains(&strip.expand_after_ratio) {
        return Err(invalid("expand_after_ratio", "must lie in [0, 1]"));
    }
    if !unit.contains(&strip.collapse_after_ratio) {
        return Err(invalid("collapse_after_ratio", "must lie in [0, 1]"));
    }
    if strip.collapse_after_ratio > strip.expand_after_ratio {
        return Err(invalid(
            "collapse_after_ratio",
            "must not exceed expand_after_ratio",
        ));
    }
    if !unit.contains(&strip.friction_ratio) {
        return Err(invalid("friction_ratio", "must lie in [0, 1]"));
    }
    if strip.small_thumbs_shown < 1 {
        return Err(invalid("small_thumbs_shown", "must be at least 1"));
    }
    if strip.preload_pages < 0 {
        return Err(invalid("preload_pages", "must not be negative"));
    }
    if strip.drag_distance < 0 {
        return Err(invalid("drag_distance", "must not be negative"));
    }
    if config.frame_interval.is_zero() {
        return Err(invalid("frame_ms", "must be positive"));
    }
    config.style.validate()?;
    Ok(())
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
