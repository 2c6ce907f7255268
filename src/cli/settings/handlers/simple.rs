//! Simple setting handlers for single-value string settings.

use crate::cli::settings::error::SettingError;
use crate::cli::settings::helpers::{
    mutate_config_with_message, success_set, success_unset, validate_backend_url, validate_bind,
    validate_log_level,
};
use crate::cli::settings::{SetContext, SettingHandler};
use crate::core::config::data::Config;
use crate::core::config::defaults::{DEFAULT_BACKEND_URL, DEFAULT_BIND, DEFAULT_LOG_LEVEL};

fn format_with_default(key: &str, value: Option<&str>, default: &str) -> String {
    match value {
        Some(value) => format!("  {key}: {value}"),
        None => format!("  {key}: (unset, default: {default})"),
    }
}

/// Handler for the `backend-url` setting.
pub struct BackendUrlHandler;

impl SettingHandler for BackendUrlHandler {
    fn key(&self) -> &'static str {
        "backend-url"
    }

    fn set(&self, args: &[String], ctx: &mut SetContext<'_>) -> Result<String, SettingError> {
        let Some(input) = args.first() else {
            return Err(SettingError::MissingArgs {
                hint: "To set the backend, specify its full URL:",
                example: "notebook-chat set backend-url https://example.com/ask",
            });
        };

        let url = validate_backend_url(input)?;
        let message = success_set(self.key(), &url);

        mutate_config_with_message(
            ctx.config_path,
            move |config| {
                config.backend_url = Some(url);
                Ok(())
            },
            message,
        )
    }

    fn unset(&self, ctx: &mut SetContext<'_>) -> Result<String, SettingError> {
        mutate_config_with_message(
            ctx.config_path,
            |config| {
                config.backend_url = None;
                Ok(())
            },
            success_unset(self.key()),
        )
    }

    fn format(&self, config: &Config) -> String {
        format_with_default(self.key(), config.backend_url.as_deref(), DEFAULT_BACKEND_URL)
    }
}

/// Handler for the `bind` setting.
pub struct BindHandler;

impl SettingHandler for BindHandler {
    fn key(&self) -> &'static str {
        "bind"
    }

    fn set(&self, args: &[String], ctx: &mut SetContext<'_>) -> Result<String, SettingError> {
        let Some(input) = args.first() else {
            return Err(SettingError::MissingArgs {
                hint: "To set the listen address, specify an IP and port:",
                example: "notebook-chat set bind 0.0.0.0:8501",
            });
        };

        let addr = validate_bind(input)?;
        let message = success_set(self.key(), &addr);

        mutate_config_with_message(
            ctx.config_path,
            move |config| {
                config.bind = Some(addr);
                Ok(())
            },
            message,
        )
    }

    fn unset(&self, ctx: &mut SetContext<'_>) -> Result<String, SettingError> {
        mutate_config_with_message(
            ctx.config_path,
            |config| {
                config.bind = None;
                Ok(())
            },
            success_unset(self.key()),
        )
    }

    fn format(&self, config: &Config) -> String {
        format_with_default(self.key(), config.bind.as_deref(), DEFAULT_BIND)
    }
}

/// Handler for the `log-level` setting.
pub struct LogLevelHandler;

impl SettingHandler for LogLevelHandler {
    fn key(&self) -> &'static str {
        "log-level"
    }

    fn set(&self, args: &[String], ctx: &mut SetContext<'_>) -> Result<String, SettingError> {
        let Some(input) = args.first() else {
            return Err(SettingError::MissingArgs {
                hint: "To set the log level, specify one of error, warn, info, debug, trace:",
                example: "notebook-chat set log-level debug",
            });
        };

        let level = validate_log_level(input)?;
        let message = success_set(self.key(), &level);

        mutate_config_with_message(
            ctx.config_path,
            move |config| {
                config.log_level = Some(level);
                Ok(())
            },
            message,
        )
    }

    fn unset(&self, ctx: &mut SetContext<'_>) -> Result<String, SettingError> {
        mutate_config_with_message(
            ctx.config_path,
            |config| {
                config.log_level = None;
                Ok(())
            },
            success_unset(self.key()),
        )
    }

    fn format(&self, config: &Config) -> String {
        format_with_default(self.key(), config.log_level.as_deref(), DEFAULT_LOG_LEVEL)
    }
}
