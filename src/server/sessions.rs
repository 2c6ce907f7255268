//! Per-browser session registry.
//!
//! Each cookie maps to its own [`Session`] behind an async mutex. Entries
//! idle longer than the configured limit are dropped on the next access.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::Mutex;
use tracing::{debug, info};
use uuid::Uuid;

use crate::core::session::Session;

pub const SESSION_COOKIE: &str = "notebook_chat_session";

pub type SharedSession = Arc<Mutex<Session>>;

struct Entry {
    session: SharedSession,
    last_seen: Instant,
}

/// A session handed to one request.
pub struct Checkout {
    pub id: String,
    pub session: SharedSession,
    /// True when the caller had no live session and a cookie must be set.
    pub created: bool,
}

pub struct SessionRegistry {
    idle_limit: Duration,
    entries: Mutex<HashMap<String, Entry>>,
}

impl SessionRegistry {
    pub fn new(idle_limit: Duration) -> Self {
        Self {
            idle_limit,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Return the session for `id`, or start a new one under a fresh id.
    /// Ids the registry never issued (or has expired) are not reused.
    pub async fn checkout(&self, id: Option<&str>) -> Checkout {
        self.checkout_at(id, Instant::now()).await
    }

    async fn checkout_at(&self, id: Option<&str>, now: Instant) -> Checkout {
        let mut entries = self.entries.lock().await;
        self.sweep(&mut entries, now);

        if let Some(id) = id {
            if let Some(entry) = entries.get_mut(id) {
                entry.last_seen = now;
                return Checkout {
                    id: id.to_string(),
                    session: Arc::clone(&entry.session),
                    created: false,
                };
            }
        }

        let id = Uuid::new_v4().to_string();
        let session = Arc::new(Mutex::new(Session::new()));
        entries.insert(
            id.clone(),
            Entry {
                session: Arc::clone(&session),
                last_seen: now,
            },
        );
        info!(session = %id, live = entries.len(), "started session");

        Checkout {
            id,
            session,
            created: true,
        }
    }

    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    fn sweep(&self, entries: &mut HashMap<String, Entry>, now: Instant) {
        let before = entries.len();
        entries.retain(|_, entry| now.saturating_duration_since(entry.last_seen) <= self.idle_limit);
        let dropped = before - entries.len();
        if dropped > 0 {
            debug!(dropped, "expired idle sessions");
        }
    }
}

/// `Set-Cookie` value for a newly issued session id.
pub fn session_cookie(id: &str) -> String {
    format!("{SESSION_COOKIE}={id}; Path=/; HttpOnly; SameSite=Lax")
}

/// Find the session id in a raw `Cookie` header.
pub fn session_id_from_cookie_header(header: &str) -> Option<&str> {
    header.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        (name == SESSION_COOKIE && !value.is_empty()).then_some(value)
    })
}
