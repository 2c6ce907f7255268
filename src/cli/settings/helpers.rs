//! Helper functions for settings operations.

use std::net::SocketAddr;
use std::path::Path;

use crate::core::config::data::Config;

use super::error::SettingError;

pub const LOG_LEVELS: &[&str] = &["error", "warn", "info", "debug", "trace"];

/// Wrapper around `Config::mutate_at` that maps errors to `SettingError::ConfigError`.
pub fn mutate_config<F>(config_path: &Path, f: F) -> Result<(), SettingError>
where
    F: FnOnce(&mut Config) -> Result<(), Box<dyn std::error::Error>>,
{
    Config::mutate_at(config_path, f).map_err(|e| SettingError::ConfigError(e.to_string()))
}

/// Apply `f` and return `message` on success.
pub fn mutate_config_with_message<F>(
    config_path: &Path,
    f: F,
    message: String,
) -> Result<String, SettingError>
where
    F: FnOnce(&mut Config) -> Result<(), Box<dyn std::error::Error>>,
{
    mutate_config(config_path, f).map(|()| message)
}

pub fn success_set(key: &str, value: &str) -> String {
    format!("✅ Set {key} to: {value}")
}

pub fn success_unset(key: &str) -> String {
    format!("✅ Unset {key} (will use default)")
}

/// Accept absolute http(s) URLs only.
pub fn validate_backend_url(input: &str) -> Result<String, SettingError> {
    let trimmed = input.trim();
    match reqwest::Url::parse(trimmed) {
        Ok(url) if matches!(url.scheme(), "http" | "https") && url.has_host() => {
            Ok(trimmed.to_string())
        }
        _ => Err(SettingError::InvalidValue {
            key: "backend-url",
            input: input.to_string(),
            hint: "Use an absolute http:// or https:// URL",
        }),
    }
}

pub fn validate_bind(input: &str) -> Result<String, SettingError> {
    input
        .trim()
        .parse::<SocketAddr>()
        .map(|addr| addr.to_string())
        .map_err(|_| SettingError::InvalidValue {
            key: "bind",
            input: input.to_string(),
            hint: "Use an IP address and port, e.g. 127.0.0.1:8501",
        })
}

pub fn validate_log_level(input: &str) -> Result<String, SettingError> {
    let normalized = input.trim().to_lowercase();
    if LOG_LEVELS.contains(&normalized.as_str()) {
        Ok(normalized)
    } else {
        Err(SettingError::InvalidValue {
            key: "log-level",
            input: input.to_string(),
            hint: "Use one of: error, warn, info, debug, trace",
        })
    }
}

pub fn validate_minutes(input: &str) -> Result<u64, SettingError> {
    match input.trim().parse::<u64>() {
        Ok(minutes) if minutes > 0 => Ok(minutes),
        _ => Err(SettingError::InvalidValue {
            key: "session-idle-minutes",
            input: input.to_string(),
            hint: "Use a whole number of minutes greater than zero",
        }),
    }
}
