use crate::core::config::data::Config;

pub const DEFAULT_BACKEND_URL: &str = "https://dbbackend001.azurewebsites.net/ask";
pub const DEFAULT_BIND: &str = "127.0.0.1:8501";
pub const DEFAULT_SESSION_IDLE_MINUTES: u64 = 60;
pub const DEFAULT_LOG_LEVEL: &str = "info";

impl Config {
    pub fn effective_backend_url(&self) -> &str {
        self.backend_url.as_deref().unwrap_or(DEFAULT_BACKEND_URL)
    }

    pub fn effective_bind(&self) -> &str {
        self.bind.as_deref().unwrap_or(DEFAULT_BIND)
    }

    pub fn effective_session_idle_minutes(&self) -> u64 {
        self.session_idle_minutes
            .unwrap_or(DEFAULT_SESSION_IDLE_MINUTES)
    }

    pub fn effective_log_level(&self) -> &str {
        self.log_level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL)
    }

    /// Layer command-line overrides on top of the persisted values.
    pub fn with_overrides(mut self, backend_url: Option<String>, bind: Option<String>) -> Self {
        if backend_url.is_some() {
            self.backend_url = backend_url;
        }
        if bind.is_some() {
            self.bind = bind;
        }
        self
    }
}
