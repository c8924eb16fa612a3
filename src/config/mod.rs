//! Configuration module.
//!
//! Tunables and style metrics come from a TOML file merged onto defaults,
//! then environment variables, then CLI flags.

pub mod keybindings;
pub mod loader;

pub use keybindings::KeyBindings;
pub use loader::{
    apply_cli_overrides, apply_env_overrides, default_config_path, default_log_path,
    load_config_file, load_config_with_precedence, merge_config, validate, ConfigError,
    ConfigFile, ResolvedConfig,
};

/// Load, merge and validate configuration in one step.
///
/// # Errors
///
/// Returns an error when a config file exists but cannot be read or parsed,
/// or when the merged values are out of range.
pub fn resolve(
    config_path: Option<std::path::PathBuf>,
    rtl_override: Option<bool>,
    full_clickable_override: Option<bool>,
) -> Result<ResolvedConfig, ConfigError> {
    let file = load_config_with_precedence(config_path)?;
    let resolved = apply_cli_overrides(
        apply_env_overrides(merge_config(file)),
        rtl_override,
        full_clickable_override,
    );
    validate(&resolved)?;
    Ok(resolved)
}
