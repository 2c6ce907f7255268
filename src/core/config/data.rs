use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Persisted settings. Every key is optional; unset keys fall back to the
/// defaults in [`crate::core::config::defaults`].
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct Config {
    /// Full URL the question is POSTed to
    pub backend_url: Option<String>,
    /// Address the web interface listens on (e.g., "127.0.0.1:8501")
    pub bind: Option<String>,
    /// Minutes a browser session may sit idle before it is dropped
    pub session_idle_minutes: Option<u64>,
    /// Base level for diagnostic logs ("error", "warn", "info", "debug", "trace")
    pub log_level: Option<String>,
}

/// Get a user-friendly display string for a path
/// Converts absolute paths to use ~ notation on Unix-like systems when possible
///
/// # Examples
/// - Unix: `/home/user/.config/notebook-chat/config.toml` → `~/.config/notebook-chat/config.toml`
/// - macOS: `/Users/user/Library/Application Support/...` → `~/Library/Application Support/...`
pub fn path_display<P: AsRef<Path>>(path: P) -> String {
    let path = path.as_ref();

    #[cfg(unix)]
    {
        if let Some(home) = std::env::var_os("HOME") {
            let home_path = PathBuf::from(home);
            if let Ok(relative) = path.strip_prefix(&home_path) {
                return format!("~/{}", relative.display());
            }
        }
    }

    path.display().to_string()
}
