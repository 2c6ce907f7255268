use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use tower::ServiceExt;

use super::{build_router, AppState};
use crate::api::{Backend, BackendError, BackendReply};
use crate::core::dispatch::{Dispatcher, GENERIC_FAILURE_TURN};
use crate::utils::logging::TranscriptLog;

#[derive(Default)]
struct EchoBackend {
    calls: AtomicUsize,
}

#[async_trait::async_trait]
impl Backend for EchoBackend {
    async fn ask(&self, question: &str) -> Result<BackendReply, BackendError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match question {
            "reject" => Ok(BackendReply::Error("Question not allowed".to_string())),
            "break" => Err(BackendError::UnexpectedShape("empty array".to_string())),
            "table" => Ok(BackendReply::Result(r#"[{"region":"east","total":3}]"#.to_string())),
            other => Ok(BackendReply::Result(format!("You asked: **{other}**"))),
        }
    }
}

fn test_app() -> (Router, Arc<EchoBackend>) {
    let backend = Arc::new(EchoBackend::default());
    let dispatcher = Dispatcher::new(backend.clone(), TranscriptLog::disabled());
    let app = build_router(AppState::new(dispatcher, Duration::from_secs(600)));
    (app, backend)
}

async fn send(app: &Router, request: Request<Body>) -> Response {
    app.clone().oneshot(request).await.unwrap()
}

fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

fn post_form(uri: &str, cookie: Option<&str>, form: &str) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(form.to_string())).unwrap()
}

/// The `name=value` part of the response's session cookie.
fn session_cookie(response: &Response) -> String {
    let raw = response
        .headers()
        .get(header::SET_COOKIE)
        .expect("response should set a session cookie")
        .to_str()
        .unwrap();
    raw.split(';').next().unwrap().to_string()
}

async fn body_text(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn start_session(app: &Router) -> String {
    let response = send(app, get("/", None)).await;
    assert_eq!(response.status(), StatusCode::OK);
    session_cookie(&response)
}

#[tokio::test]
async fn first_visit_sets_cookie_and_renders_empty_chat() {
    let (app, _) = test_app();

    let response = send(&app, get("/", None)).await;

    assert_eq!(response.status(), StatusCode::OK);
    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(set_cookie.starts_with("notebook_chat_session="));
    assert!(set_cookie.contains("HttpOnly"));
    assert!(set_cookie.contains("SameSite=Lax"));

    let page = body_text(response).await;
    assert!(page.contains("<title>Notebook Chat - Chat 1</title>"));
}

#[tokio::test]
async fn returning_visitor_keeps_session_without_new_cookie() {
    let (app, _) = test_app();
    let cookie = start_session(&app).await;

    let response = send(&app, get("/", Some(&cookie))).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().get(header::SET_COOKIE).is_none());
}

#[tokio::test]
async fn ask_renders_answer_and_persists_transcript() {
    let (app, backend) = test_app();
    let cookie = start_session(&app).await;

    let response = send(&app, post_form("/ask", Some(&cookie), "question=hello+there")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let page = body_text(response).await;
    assert!(page.contains("hello there"));
    assert!(page.contains("You asked: <strong>hello there</strong>"));
    assert_eq!(backend.calls.load(Ordering::SeqCst), 1);

    let page = body_text(send(&app, get("/", Some(&cookie))).await).await;
    assert!(page.contains("You asked: <strong>hello there</strong>"));
}

#[tokio::test]
async fn sessions_do_not_leak_between_cookies() {
    let (app, _) = test_app();
    let alice = start_session(&app).await;
    let bob = start_session(&app).await;
    assert_ne!(alice, bob);

    send(&app, post_form("/ask", Some(&alice), "question=secret")).await;

    let page = body_text(send(&app, get("/", Some(&bob))).await).await;
    assert!(!page.contains("secret"));
}

#[tokio::test]
async fn backend_error_is_shown_once() {
    let (app, _) = test_app();
    let cookie = start_session(&app).await;

    let page = body_text(send(&app, post_form("/ask", Some(&cookie), "question=reject")).await).await;
    assert!(page.contains("<div class=\"notice\" role=\"alert\">Question not allowed</div>"));

    let page = body_text(send(&app, get("/", Some(&cookie))).await).await;
    assert!(!page.contains("class=\"notice\""));
    assert!(page.contains("Question not allowed"));
}

#[tokio::test]
async fn processing_failure_stores_generic_turn() {
    let (app, _) = test_app();
    let cookie = start_session(&app).await;

    let page = body_text(send(&app, post_form("/ask", Some(&cookie), "question=break")).await).await;
    assert!(page.contains("An error occurred: "));
    assert!(page.contains(GENERIC_FAILURE_TURN));

    let response = send(&app, get("/api/session", Some(&cookie))).await;
    let json: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
    let turns = json["active"]["turns"].as_array().unwrap();
    assert_eq!(turns.len(), 2);
    assert_eq!(turns[1]["content"], GENERIC_FAILURE_TURN);
}

#[tokio::test]
async fn table_answer_renders_grid() {
    let (app, _) = test_app();
    let cookie = start_session(&app).await;

    let page = body_text(send(&app, post_form("/ask", Some(&cookie), "question=table")).await).await;
    assert!(page.contains("<th>region</th><th>total</th>"));
    assert!(page.contains("<td>east</td><td>3</td>"));
}

#[tokio::test]
async fn blank_question_is_ignored() {
    let (app, backend) = test_app();
    let cookie = start_session(&app).await;

    let response = send(&app, post_form("/ask", Some(&cookie), "question=+++")).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(backend.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn chat_management_round_trip() {
    let (app, _) = test_app();
    let cookie = start_session(&app).await;

    send(&app, post_form("/ask", Some(&cookie), "question=first")).await;
    let response = send(&app, post_form("/chats/new", Some(&cookie), "")).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/");

    let response = send(
        &app,
        post_form("/chats/0/rename", Some(&cookie), "name=Revenue+questions"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let response = send(&app, get("/api/session", Some(&cookie))).await;
    let json: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(json["active"]["name"], "Chat 2");
    assert_eq!(json["archive"][0]["name"], "Revenue questions");

    let response = send(&app, post_form("/chats/0/select", Some(&cookie), "")).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let page = body_text(send(&app, get("/", Some(&cookie))).await).await;
    assert!(page.contains("<title>Notebook Chat - Revenue questions</title>"));

    let response = send(&app, post_form("/chats/0/delete", Some(&cookie), "")).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let response = send(&app, get("/api/session", Some(&cookie))).await;
    let json: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(json["archive"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn unknown_conversation_index_is_not_found() {
    let (app, _) = test_app();
    let cookie = start_session(&app).await;

    for action in ["select", "delete"] {
        let response = send(&app, post_form(&format!("/chats/3/{action}"), Some(&cookie), "")).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
    let response = send(&app, post_form("/chats/3/rename", Some(&cookie), "name=x")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn oversized_body_is_rejected() {
    let (app, backend) = test_app();
    let cookie = start_session(&app).await;
    let form = format!("question={}", "a".repeat(super::routes::MAX_BODY_BYTES + 1));

    let request = Request::builder()
        .method("POST")
        .uri("/ask")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .header(header::CONTENT_LENGTH, form.len())
        .header(header::COOKIE, &cookie)
        .body(Body::from(form))
        .unwrap();

    let response = send(&app, request).await;

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(backend.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn health_check_reports_ok() {
    let (app, _) = test_app();

    let response = send(&app, get("/healthz", None)).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(json["status"], "ok");
    assert_eq!(json["service"], "notebook-chat");
}
