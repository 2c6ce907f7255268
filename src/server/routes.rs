//! HTTP routes.

use std::fmt;

use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
    Form, Json, Router,
};
use serde::Deserialize;
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};
use tracing::{debug, warn};

use crate::core::session::{Session, SessionError};
use crate::server::sessions::{session_cookie, session_id_from_cookie_header, Checkout};
use crate::server::AppState;
use crate::ui::render_session;

pub const MAX_BODY_BYTES: usize = 64 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(show_page))
        .route("/ask", post(ask))
        .route("/chats/new", post(new_chat))
        .route("/chats/:index/select", post(select_chat))
        .route("/chats/:index/delete", post(delete_chat))
        .route("/chats/:index/rename", post(rename_chat))
        .route("/api/session", get(session_json))
        .route("/healthz", get(health_check))
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Errors a chat mutation can answer with.
#[derive(Debug)]
pub enum RouteError {
    Session(SessionError),
}

impl fmt::Display for RouteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteError::Session(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for RouteError {}

impl From<SessionError> for RouteError {
    fn from(err: SessionError) -> Self {
        RouteError::Session(err)
    }
}

impl IntoResponse for RouteError {
    fn into_response(self) -> Response {
        let status = match &self {
            RouteError::Session(SessionError::NoSuchConversation { .. }) => StatusCode::NOT_FOUND,
        };
        (status, self.to_string()).into_response()
    }
}

async fn checkout_session(state: &AppState, headers: &HeaderMap) -> Checkout {
    let id = headers
        .get(header::COOKIE)
        .and_then(|value| value.to_str().ok())
        .and_then(session_id_from_cookie_header);
    state.sessions.checkout(id).await
}

/// Attach the session cookie when the request started a new session.
fn with_cookie(checkout: &Checkout, response: impl IntoResponse) -> Response {
    let mut response = response.into_response();
    if checkout.created {
        match HeaderValue::from_str(&session_cookie(&checkout.id)) {
            Ok(value) => {
                response.headers_mut().append(header::SET_COOKIE, value);
            }
            Err(err) => warn!(error = %err, "session id is not a valid header value"),
        }
    }
    response
}

async fn show_page(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let checkout = checkout_session(&state, &headers).await;
    let page = {
        let session = checkout.session.lock().await;
        render_session(&session, None)
    };
    with_cookie(&checkout, Html(page))
}

#[derive(Debug, Deserialize)]
pub struct AskForm {
    #[serde(default)]
    pub question: String,
}

async fn ask(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<AskForm>,
) -> Response {
    let checkout = checkout_session(&state, &headers).await;
    // Held across the backend call so turns within a session stay ordered.
    let mut session = checkout.session.lock().await;

    let page = if form.question.trim().is_empty() {
        debug!("ignoring blank question");
        render_session(&session, None)
    } else {
        let outcome = state.dispatcher.submit(&mut session, &form.question).await;
        render_session(&session, outcome.notice.as_ref())
    };
    drop(session);

    with_cookie(&checkout, Html(page))
}

/// Run a mutation on the caller's session and send the browser back to `/`.
async fn mutate<F>(state: &AppState, headers: &HeaderMap, action: F) -> Response
where
    F: FnOnce(&mut Session) -> Result<(), SessionError> + Send,
{
    let checkout = checkout_session(state, headers).await;
    let result = {
        let mut session = checkout.session.lock().await;
        action(&mut session)
    };
    match result {
        Ok(()) => with_cookie(&checkout, Redirect::to("/")),
        Err(err) => with_cookie(&checkout, RouteError::from(err)),
    }
}

async fn new_chat(State(state): State<AppState>, headers: HeaderMap) -> Response {
    mutate(&state, &headers, |session| {
        session.start_new_conversation();
        Ok(())
    })
    .await
}

async fn select_chat(
    State(state): State<AppState>,
    Path(index): Path<usize>,
    headers: HeaderMap,
) -> Response {
    mutate(&state, &headers, |session| session.select_conversation(index)).await
}

async fn delete_chat(
    State(state): State<AppState>,
    Path(index): Path<usize>,
    headers: HeaderMap,
) -> Response {
    mutate(&state, &headers, |session| {
        session.delete_conversation(index).map(|_| ())
    })
    .await
}

#[derive(Debug, Deserialize)]
pub struct RenameForm {
    #[serde(default)]
    pub name: String,
}

async fn rename_chat(
    State(state): State<AppState>,
    Path(index): Path<usize>,
    headers: HeaderMap,
    Form(form): Form<RenameForm>,
) -> Response {
    mutate(&state, &headers, move |session| {
        session.rename_conversation(index, form.name)
    })
    .await
}

async fn session_json(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let checkout = checkout_session(&state, &headers).await;
    let snapshot = checkout.session.lock().await.clone();
    with_cookie(&checkout, Json(snapshot))
}

async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION")
    }))
}
