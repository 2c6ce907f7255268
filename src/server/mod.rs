//! Browser-facing HTTP server.
//!
//! [`build_router`] wires the routes in [`routes`] over an [`AppState`];
//! [`start_server`] binds it and serves until Ctrl-C.

pub mod routes;
pub mod sessions;

#[cfg(test)]
mod tests;

use std::error::Error;
use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use crate::api::HttpBackend;
use crate::core::config::Config;
use crate::core::dispatch::Dispatcher;
use crate::utils::logging::TranscriptLog;

pub use routes::build_router;
pub use sessions::{SessionRegistry, SESSION_COOKIE};

#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Dispatcher,
    pub sessions: Arc<SessionRegistry>,
}

impl AppState {
    pub fn new(dispatcher: Dispatcher, idle_limit: Duration) -> Self {
        Self {
            dispatcher,
            sessions: Arc::new(SessionRegistry::new(idle_limit)),
        }
    }

    pub fn from_config(config: &Config, transcript: TranscriptLog) -> Self {
        let backend = HttpBackend::new(config.effective_backend_url());
        let dispatcher = Dispatcher::new(Arc::new(backend), transcript);
        let idle = Duration::from_secs(config.effective_session_idle_minutes().saturating_mul(60));
        Self::new(dispatcher, idle)
    }
}

pub async fn start_server(config: &Config, transcript: TranscriptLog) -> Result<(), Box<dyn Error>> {
    let listener = tokio::net::TcpListener::bind(config.effective_bind()).await?;
    let address = listener.local_addr()?;

    let started = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
    if let Err(err) = transcript.log_marker(&format!("Serving on {address} at {started}")) {
        warn!(error = %err, "failed to write transcript log");
    }
    let transcript_status = transcript.get_status_string();
    let app = build_router(AppState::from_config(config, transcript));

    info!(
        address = %address,
        backend = %config.effective_backend_url(),
        transcript = %transcript_status,
        "serving notebook chat"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "failed to listen for shutdown signal");
    }
}
