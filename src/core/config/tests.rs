use super::data::Config;
use super::defaults::{DEFAULT_BACKEND_URL, DEFAULT_BIND, DEFAULT_SESSION_IDLE_MINUTES};
use super::io::ConfigError;
use crate::cli::settings::{set_setting, unset_setting, SetContext, SettingError};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

#[test]
fn test_load_nonexistent_config() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("nonexistent_config.toml");

    let config = Config::load_from_path(&config_path).expect("Failed to load config");

    assert_eq!(config, Config::default());
    assert_eq!(config.effective_backend_url(), DEFAULT_BACKEND_URL);
    assert_eq!(config.effective_bind(), DEFAULT_BIND);
    assert_eq!(
        config.effective_session_idle_minutes(),
        DEFAULT_SESSION_IDLE_MINUTES
    );
}

#[test]
fn test_config_persistence_lifecycle() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("nested").join("config.toml");

    let config = Config {
        backend_url: Some("http://localhost:9000/ask".to_string()),
        session_idle_minutes: Some(5),
        ..Default::default()
    };
    config
        .save_to_path(&config_path)
        .expect("Failed to save config");

    let loaded = Config::load_from_path(&config_path).expect("Failed to load config");
    assert_eq!(loaded, config);
    assert_eq!(loaded.effective_backend_url(), "http://localhost:9000/ask");
    assert_eq!(loaded.effective_session_idle_minutes(), 5);

    Config::mutate_at(&config_path, |config| {
        config.backend_url = None;
        Ok(())
    })
    .expect("Failed to mutate config");

    let reloaded = Config::load_from_path(&config_path).expect("Failed to reload config");
    assert_eq!(reloaded.backend_url, None);
    assert_eq!(reloaded.session_idle_minutes, Some(5));
}

#[test]
fn test_invalid_toml_reports_path() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("config.toml");
    fs::write(&config_path, "backend_url = [unterminated").expect("write config");

    let err = Config::load_from_path(&config_path).unwrap_err();

    assert!(matches!(err, ConfigError::Parse { .. }));
    assert!(err.to_string().contains("Failed to parse config at"));
}

#[test]
fn test_failed_mutation_does_not_save() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("config.toml");

    let result: Result<(), _> = Config::mutate_at(&config_path, |config| {
        config.bind = Some("0.0.0.0:1".to_string());
        Err("rejected".into())
    });

    assert!(result.is_err());
    assert!(!config_path.exists());
}

#[test]
fn test_cli_overrides_take_precedence() {
    let config = Config {
        backend_url: Some("http://file/ask".to_string()),
        bind: Some("127.0.0.1:1".to_string()),
        ..Default::default()
    }
    .with_overrides(Some("http://flag/ask".to_string()), None);

    assert_eq!(config.effective_backend_url(), "http://flag/ask");
    assert_eq!(config.effective_bind(), "127.0.0.1:1");
}

fn settings_context_path(temp_dir: &TempDir) -> PathBuf {
    temp_dir.path().join("config.toml")
}

#[test]
fn test_set_and_unset_through_registry() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let config_path = settings_context_path(&temp_dir);
    let mut ctx = SetContext {
        config_path: &config_path,
    };

    let message = set_setting("bind", &["0.0.0.0:9000".to_string()], &mut ctx).expect("set bind");
    assert_eq!(message, "✅ Set bind to: 0.0.0.0:9000");
    set_setting("log-level", &["DEBUG".to_string()], &mut ctx).expect("set log level");

    let loaded = Config::load_from_path(&config_path).expect("load");
    assert_eq!(loaded.bind.as_deref(), Some("0.0.0.0:9000"));
    assert_eq!(loaded.log_level.as_deref(), Some("debug"));

    unset_setting("bind", &mut ctx).expect("unset bind");
    let loaded = Config::load_from_path(&config_path).expect("load");
    assert_eq!(loaded.bind, None);
    assert_eq!(loaded.log_level.as_deref(), Some("debug"));
}

#[test]
fn test_set_rejects_unknown_keys_and_bad_values() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let config_path = settings_context_path(&temp_dir);
    let mut ctx = SetContext {
        config_path: &config_path,
    };

    assert_eq!(
        set_setting("theme", &["dark".to_string()], &mut ctx),
        Err(SettingError::UnknownKey("theme".to_string()))
    );
    assert!(matches!(
        set_setting("session-idle-minutes", &["soon".to_string()], &mut ctx),
        Err(SettingError::InvalidValue { .. })
    ));
    assert!(matches!(
        set_setting("backend-url", &[], &mut ctx),
        Err(SettingError::MissingArgs { .. })
    ));
    assert!(!config_path.exists());
}

#[test]
fn test_describe_all_lists_every_key_with_defaults() {
    let config = Config {
        session_idle_minutes: Some(10),
        ..Default::default()
    };

    let lines = config.describe_all();

    assert_eq!(
        lines,
        vec![
            format!("  backend-url: (unset, default: {DEFAULT_BACKEND_URL})"),
            format!("  bind: (unset, default: {DEFAULT_BIND})"),
            "  session-idle-minutes: 10".to_string(),
            "  log-level: (unset, default: info)".to_string(),
        ]
    );
}
