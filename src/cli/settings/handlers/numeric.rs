//! Numeric setting handlers.

use crate::cli::settings::error::SettingError;
use crate::cli::settings::helpers::{
    mutate_config_with_message, success_set, success_unset, validate_minutes,
};
use crate::cli::settings::{SetContext, SettingHandler};
use crate::core::config::data::Config;
use crate::core::config::defaults::DEFAULT_SESSION_IDLE_MINUTES;

/// Handler for the `session-idle-minutes` setting.
pub struct SessionIdleMinutesHandler;

impl SettingHandler for SessionIdleMinutesHandler {
    fn key(&self) -> &'static str {
        "session-idle-minutes"
    }

    fn set(&self, args: &[String], ctx: &mut SetContext<'_>) -> Result<String, SettingError> {
        let Some(input) = args.first() else {
            return Err(SettingError::MissingArgs {
                hint: "To set the idle timeout, specify a number of minutes:",
                example: "notebook-chat set session-idle-minutes 30",
            });
        };

        let minutes = validate_minutes(input)?;
        let message = success_set(self.key(), &minutes.to_string());

        mutate_config_with_message(
            ctx.config_path,
            move |config| {
                config.session_idle_minutes = Some(minutes);
                Ok(())
            },
            message,
        )
    }

    fn unset(&self, ctx: &mut SetContext<'_>) -> Result<String, SettingError> {
        mutate_config_with_message(
            ctx.config_path,
            |config| {
                config.session_idle_minutes = None;
                Ok(())
            },
            success_unset(self.key()),
        )
    }

    fn format(&self, config: &Config) -> String {
        match config.session_idle_minutes {
            Some(minutes) => format!("  {}: {minutes}", self.key()),
            None => format!(
                "  {}: (unset, default: {DEFAULT_SESSION_IDLE_MINUTES})",
                self.key()
            ),
        }
    }
}
