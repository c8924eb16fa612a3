//! Tests for configuration file loading.

use super::*;
use serial_test::serial;
use std::env;
use std::fs;

#[test]
fn default_config_path_contains_storystrip_config_toml() {
    let Some(path) = default_config_path() else {
        return;
    };
    let path_str = path.to_string_lossy();
    assert!(
        path_str.contains("storystrip") && path_str.ends_with("config.toml"),
        "Path should contain 'storystrip' and end with 'config.toml', got: {}",
        path_str
    );
}

#[test]
fn load_config_file_returns_ok_none_for_missing_file() {
    let result = load_config_file("/nonexistent/path/to/config.toml");
    assert_eq!(
        result,
        Ok(None),
        "Missing config file should return Ok(None), not an error"
    );
}

#[test]
fn load_config_file_parses_valid_toml() {
    let config_path = env::temp_dir().join("storystrip_test_config.toml");

    let toml_content = r#"
small_thumbs_shown = 4
expand_after_ratio = 0.8
collapse_after_ratio = 0.6
expand_catch_up_ms = 300
full_clickable = true

[style.full]
photo = 12
"#;

    fs::write(&config_path, toml_content).expect("Failed to write test config");

    let config = load_config_file(&config_path)
        .expect("Should successfully parse valid TOML")
        .expect("Should return Some(ConfigFile) for existing file");

    assert_eq!(config.small_thumbs_shown, Some(4));
    assert_eq!(config.expand_after_ratio, Some(0.8));
    assert_eq!(config.collapse_after_ratio, Some(0.6));
    assert_eq!(config.expand_catch_up_ms, Some(300));
    assert_eq!(config.full_clickable, Some(true));
    let style = config.style.expect("style section");
    assert_eq!(style.full.photo, 12);
    assert_eq!(style.small, StripStyle::default().small);

    fs::remove_file(config_path).ok();
}

#[test]
fn load_config_file_returns_error_for_invalid_toml() {
    let config_path = env::temp_dir().join("storystrip_test_invalid.toml");

    fs::write(&config_path, "this is not valid TOML ][}{")
        .expect("Failed to write invalid test config");

    let result = load_config_file(&config_path);

    match result {
        Err(ConfigError::ParseError { path, reason: _ }) => {
            assert_eq!(path, config_path);
        }
        _ => panic!("Expected ParseError, got {:?}", result),
    }

    fs::remove_file(config_path).ok();
}

#[test]
fn config_file_rejects_unknown_fields() {
    let result: Result<ConfigFile, _> = toml::from_str("theme = \"dark\"\n");
    assert!(result.is_err(), "Unknown keys must be rejected");

    let nested: Result<ConfigFile, _> = toml::from_str("[style.small]\nradius = 3\n");
    assert!(nested.is_err(), "Unknown style keys must be rejected");
}

// ===== merge_config =====

#[test]
fn merge_config_uses_defaults_when_none() {
    assert_eq!(merge_config(None), ResolvedConfig::default());
}

#[test]
fn merge_config_overrides_with_config_file_values() {
    let file = ConfigFile {
        preload_pages: Some(5),
        friction_ratio: Some(0.3),
        expand_duration_ms: Some(120),
        drag_distance: Some(4),
        frame_ms: Some(33),
        ..ConfigFile::default()
    };

    let resolved = merge_config(Some(file));

    assert_eq!(resolved.strip.preload_pages, 5);
    assert_eq!(resolved.strip.friction_ratio, 0.3);
    assert_eq!(resolved.strip.expand_duration, Duration::from_millis(120));
    assert_eq!(resolved.strip.drag_distance, 4);
    assert_eq!(resolved.frame_interval, Duration::from_millis(33));
}

#[test]
fn merge_config_uses_defaults_for_none_fields() {
    let resolved = merge_config(Some(ConfigFile {
        right_to_left: Some(true),
        ..ConfigFile::default()
    }));
    let defaults = ResolvedConfig::default();

    assert!(resolved.strip.right_to_left);
    assert_eq!(
        resolved.strip.expand_after_ratio,
        defaults.strip.expand_after_ratio
    );
    assert_eq!(resolved.style, defaults.style);
}

// ===== validate =====

#[test]
fn default_config_is_valid() {
    assert_eq!(validate(&ResolvedConfig::default()), Ok(()));
}

#[test]
fn validate_rejects_inverted_thresholds() {
    let mut config = ResolvedConfig::default();
    config.strip.collapse_after_ratio = 0.9;

    assert!(matches!(
        validate(&config),
        Err(ConfigError::InvalidValue {
            field: "collapse_after_ratio",
            ..
        })
    ));
}

#[test]
fn validate_rejects_out_of_range_friction() {
    let mut config = ResolvedConfig::default();
    config.strip.friction_ratio = 1.5;
    assert!(validate(&config).is_err());
}

#[test]
fn validate_rejects_zero_compact_count() {
    let mut config = ResolvedConfig::default();
    config.strip.small_thumbs_shown = 0;
    assert!(validate(&config).is_err());
}

#[test]
fn validate_reports_style_errors() {
    let mut config = ResolvedConfig::default();
    config.style.small.shift = 0;
    assert_eq!(
        validate(&config),
        Err(ConfigError::Style(StripError::NonPositiveMetric {
            name: "small.shift",
            value: 0
        }))
    );
}

// ===== Environment =====

/// RAII guard to ensure environment variable cleanup even under test parallelism.
struct EnvGuard(&'static str);

impl EnvGuard {
    fn new(name: &'static str) -> Self {
        env::remove_var(name);
        EnvGuard(name)
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        env::remove_var(self.0);
    }
}

#[test]
#[serial(storystrip_env)]
fn apply_env_overrides_respects_rtl() {
    let _guard = EnvGuard::new(RTL_ENV);
    env::set_var(RTL_ENV, "1");

    let result = apply_env_overrides(ResolvedConfig::default());

    assert!(result.strip.right_to_left);
    assert!(!result.strip.full_clickable);
}

#[test]
#[serial(storystrip_env)]
fn apply_env_overrides_respects_full_clickable() {
    let _guard = EnvGuard::new(FULL_CLICKABLE_ENV);
    env::set_var(FULL_CLICKABLE_ENV, "true");

    let result = apply_env_overrides(ResolvedConfig::default());

    assert!(result.strip.full_clickable);
}

#[test]
#[serial(storystrip_env)]
fn apply_env_overrides_ignores_garbage() {
    let _guard = EnvGuard::new(RTL_ENV);
    env::set_var(RTL_ENV, "sideways");

    let base = ResolvedConfig::default();
    assert_eq!(apply_env_overrides(base.clone()), base);
}

#[test]
#[serial(storystrip_env)]
fn apply_env_overrides_no_change_when_env_var_not_set() {
    let _rtl = EnvGuard::new(RTL_ENV);
    let _clickable = EnvGuard::new(FULL_CLICKABLE_ENV);

    let base = ResolvedConfig::default();
    assert_eq!(apply_env_overrides(base.clone()), base);
}

#[test]
#[serial(storystrip_config)]
fn load_config_with_precedence_prefers_explicit_path() {
    let _guard = EnvGuard::new(CONFIG_ENV);
    let temp_dir = env::temp_dir();
    let explicit_path = temp_dir.join("storystrip_explicit.toml");
    fs::write(&explicit_path, "preload_pages = 7\n").expect("Failed to write explicit config");

    let env_path = temp_dir.join("storystrip_env.toml");
    fs::write(&env_path, "preload_pages = 9\n").expect("Failed to write env config");
    env::set_var(CONFIG_ENV, &env_path);

    let config = load_config_with_precedence(Some(explicit_path.clone()))
        .expect("load")
        .expect("file exists");

    assert_eq!(
        config.preload_pages,
        Some(7),
        "Should use explicit path, not STORYSTRIP_CONFIG env var"
    );

    fs::remove_file(explicit_path).ok();
    fs::remove_file(env_path).ok();
}

#[test]
#[serial(storystrip_config)]
fn load_config_with_precedence_uses_env_var_when_no_explicit_path() {
    let _guard = EnvGuard::new(CONFIG_ENV);
    let env_path = env::temp_dir().join("storystrip_env_only.toml");
    fs::write(&env_path, "drag_distance = 6\n").expect("Failed to write env config");
    env::set_var(CONFIG_ENV, &env_path);

    let config = load_config_with_precedence(None)
        .expect("load")
        .expect("file exists");

    assert_eq!(config.drag_distance, Some(6));

    fs::remove_file(env_path).ok();
}

// ===== Precedence chain =====

#[test]
fn apply_cli_overrides_no_overrides() {
    let base = ResolvedConfig::default();
    assert_eq!(apply_cli_overrides(base.clone(), None, None), base);
}

#[test]
#[serial(storystrip_env)]
fn precedence_chain_env_vars_to_cli_args() {
    let _guard = EnvGuard::new(RTL_ENV);

    // GIVEN a config file enabling right-to-left
    let file = ConfigFile {
        right_to_left: Some(true),
        full_clickable: Some(false),
        ..ConfigFile::default()
    };
    // AND an env var disabling it again
    env::set_var(RTL_ENV, "0");

    // WHEN the CLI enables full clickability
    let resolved = apply_cli_overrides(
        apply_env_overrides(merge_config(Some(file))),
        None,
        Some(true),
    );

    // THEN each layer wins over the previous one
    assert!(!resolved.strip.right_to_left);
    assert!(resolved.strip.full_clickable);
}
