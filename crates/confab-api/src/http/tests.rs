//! End-to-end HTTP tests.
//!
//! Each test boots the full stack on an ephemeral port: a tempfile-backed
//! SQLite database and a fake Workers AI upstream the provider is pointed
//! at via `with_base_url`. Requests go through a real client so routing,
//! CORS, serde and error mapping are all exercised.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::Json;
use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use secrecy::SecretString;
use serde_json::{Value, json};

use confab_core::chat::{ChatService, FALLBACK_REPLY, HISTORY_WINDOW};
use confab_infra::llm::WorkersAiProvider;
use confab_infra::sqlite::{DatabasePool, SqliteHistoryStore};
use confab_types::chat::ChatTurn;
use confab_types::config::DEFAULT_MODEL;

use crate::http::router::build_router;
use crate::state::HttpState;

/// Scripted Workers AI upstream: replays a configurable (status, body)
/// pair and records every request body it sees.
#[derive(Clone)]
struct FakeAi {
    requests: Arc<Mutex<Vec<Value>>>,
    reply: Arc<Mutex<(u16, Value)>>,
}

impl FakeAi {
    fn new(reply: (u16, Value)) -> Self {
        Self {
            requests: Arc::new(Mutex::new(Vec::new())),
            reply: Arc::new(Mutex::new(reply)),
        }
    }

    fn set_reply(&self, reply: (u16, Value)) {
        *self.reply.lock().unwrap() = reply;
    }

    fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

async fn fake_ai_run(
    State(fake): State<FakeAi>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    fake.requests.lock().unwrap().push(body);
    let (status, body) = fake.reply.lock().unwrap().clone();
    (StatusCode::from_u16(status).unwrap(), Json(body))
}

fn envelope_ok(text: &str) -> (u16, Value) {
    (
        200,
        json!({"result": {"response": text}, "success": true, "errors": []}),
    )
}

async fn spawn(app: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

struct TestApp {
    base: String,
    client: reqwest::Client,
    ai: FakeAi,
    state: HttpState,
}

impl TestApp {
    async fn start(reply: (u16, Value)) -> Self {
        let ai = FakeAi::new(reply);
        let upstream = Router::new()
            .route("/accounts/{account}/ai/run/{*model}", post(fake_ai_run))
            .with_state(ai.clone());
        let upstream_addr = spawn(upstream).await;

        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("confab.db");
        let url = format!("sqlite://{}?mode=rwc", db_path.display());
        std::mem::forget(dir);
        let pool = DatabasePool::new(&url).await.unwrap();

        let provider = WorkersAiProvider::new(
            SecretString::from("test-token"),
            "acct-test".to_string(),
            DEFAULT_MODEL.to_string(),
        )
        .with_base_url(format!("http://{upstream_addr}"));

        let chat_service = ChatService::new(
            SqliteHistoryStore::new(pool),
            provider,
            DEFAULT_MODEL.to_string(),
        );
        let state = HttpState {
            chat_service: Arc::new(chat_service),
        };

        let addr = spawn(build_router(state.clone())).await;

        Self {
            base: format!("http://{addr}"),
            client: reqwest::Client::new(),
            ai,
            state,
        }
    }

    async fn post(&self, path: &str, body: &Value) -> reqwest::Response {
        self.client
            .post(format!("{}{path}", self.base))
            .json(body)
            .send()
            .await
            .unwrap()
    }

    async fn stored(&self, session_id: &str) -> Vec<ChatTurn> {
        self.state.chat_service.history(session_id).await.unwrap()
    }
}

#[tokio::test]
async fn test_chat_roundtrip_persists_exchange() {
    let app = TestApp::start(envelope_ok("Hello!")).await;

    let res = app
        .post("/api/chat", &json!({"message": "Hi", "sessionId": "s1"}))
        .await;
    assert_eq!(res.status(), 200);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body, json!({"response": "Hello!", "sessionId": "s1"}));

    assert_eq!(
        app.stored("s1").await,
        vec![ChatTurn::user("Hi"), ChatTurn::assistant("Hello!")]
    );

    // The upstream saw the persona turn first and the new message last.
    let sent = app.ai.requests.lock().unwrap().last().cloned().unwrap();
    let messages = sent["messages"].as_array().unwrap();
    assert_eq!(messages.first().unwrap()["role"], "system");
    assert_eq!(messages.last().unwrap()["content"], "Hi");
}

#[tokio::test]
async fn test_missing_fields_return_400_without_side_effects() {
    let app = TestApp::start(envelope_ok("unused")).await;

    for body in [
        json!({"sessionId": "s1"}),
        json!({"message": "Hi"}),
        json!({}),
        json!({"message": "", "sessionId": "s1"}),
    ] {
        let res = app.post("/api/chat", &body).await;
        assert_eq!(res.status(), 400, "body: {body}");
        let reply: Value = res.json().await.unwrap();
        assert!(reply["error"].is_string());
    }

    assert_eq!(app.ai.request_count(), 0);
    assert!(app.stored("s1").await.is_empty());
}

#[tokio::test]
async fn test_malformed_body_returns_400() {
    let app = TestApp::start(envelope_ok("unused")).await;

    let res = app
        .client
        .post(format!("{}/api/chat", app.base))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 400);
    let body: Value = res.json().await.unwrap();
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_empty_generation_returns_and_persists_fallback() {
    let app = TestApp::start((200, json!({"result": {"response": ""}, "success": true}))).await;

    let res = app
        .post("/api/chat", &json!({"message": "Hi", "sessionId": "s1"}))
        .await;
    assert_eq!(res.status(), 200);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["response"], FALLBACK_REPLY);

    let stored = app.stored("s1").await;
    assert_eq!(stored[1], ChatTurn::assistant(FALLBACK_REPLY));
}

#[tokio::test]
async fn test_upstream_failure_returns_500_and_preserves_history() {
    let app = TestApp::start(envelope_ok("first")).await;
    app.post("/api/chat", &json!({"message": "one", "sessionId": "s1"}))
        .await;
    let before = app.stored("s1").await;

    app.ai.set_reply((
        500,
        json!({"success": false, "errors": [{"code": 7000, "message": "boom"}]}),
    ));
    let res = app
        .post("/api/chat", &json!({"message": "two", "sessionId": "s1"}))
        .await;
    assert_eq!(res.status(), 500);
    let body: Value = res.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().contains("HTTP 500"));

    assert_eq!(app.stored("s1").await, before);
}

#[tokio::test]
async fn test_window_capped_over_many_exchanges() {
    let app = TestApp::start(envelope_ok("ok")).await;

    for i in 0..11 {
        let res = app
            .post(
                "/api/chat",
                &json!({"message": format!("message {i}"), "sessionId": "s1"}),
            )
            .await;
        assert_eq!(res.status(), 200);
    }

    let stored = app.stored("s1").await;
    assert_eq!(stored.len(), HISTORY_WINDOW);
    // 22 turns were produced; the first exchange fell out of the window.
    assert_eq!(stored[0], ChatTurn::user("message 1"));
    assert_eq!(stored[HISTORY_WINDOW - 1], ChatTurn::assistant("ok"));
}

#[tokio::test]
async fn test_clear_deletes_history() {
    let app = TestApp::start(envelope_ok("Hello!")).await;
    app.post("/api/chat", &json!({"message": "Hi", "sessionId": "s1"}))
        .await;

    let res = app.post("/api/clear", &json!({"sessionId": "s1"})).await;
    assert_eq!(res.status(), 200);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body, json!({"success": true}));

    assert!(app.stored("s1").await.is_empty());
}

#[tokio::test]
async fn test_clear_is_idempotent_and_tolerates_absent_field() {
    let app = TestApp::start(envelope_ok("unused")).await;

    let res = app
        .post("/api/clear", &json!({"sessionId": "never-existed"}))
        .await;
    assert_eq!(res.status(), 200);

    let res = app.post("/api/clear", &json!({})).await;
    assert_eq!(res.status(), 200);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["success"], true);
}

#[tokio::test]
async fn test_preflight_carries_cors_headers() {
    let app = TestApp::start(envelope_ok("unused")).await;

    let res = app
        .client
        .request(reqwest::Method::OPTIONS, format!("{}/api/chat", app.base))
        .header("origin", "http://example.com")
        .header("access-control-request-method", "POST")
        .header("access-control-request-headers", "content-type")
        .send()
        .await
        .unwrap();

    assert!(res.status().is_success());
    let headers = res.headers();
    assert_eq!(headers["access-control-allow-origin"], "*");
    let methods = headers["access-control-allow-methods"].to_str().unwrap();
    assert!(methods.contains("POST"));
    assert!(res.text().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_json_responses_carry_cors_headers() {
    let app = TestApp::start(envelope_ok("Hello!")).await;

    let res = app
        .client
        .post(format!("{}/api/chat", app.base))
        .header("origin", "http://example.com")
        .json(&json!({"message": "Hi", "sessionId": "s1"}))
        .send()
        .await
        .unwrap();

    let headers = res.headers();
    assert_eq!(headers["access-control-allow-origin"], "*");
    assert_eq!(headers["access-control-allow-methods"], "GET, POST, OPTIONS");
    assert_eq!(headers["access-control-allow-headers"], "Content-Type");
    assert!(
        headers["content-type"]
            .to_str()
            .unwrap()
            .starts_with("application/json")
    );
}

#[tokio::test]
async fn test_unknown_paths_serve_frontend() {
    let app = TestApp::start(envelope_ok("unused")).await;

    for path in ["/", "/anything", "/deep/nested/path"] {
        let res = app
            .client
            .get(format!("{}{path}", app.base))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), 200);
        assert!(
            res.headers()["content-type"]
                .to_str()
                .unwrap()
                .starts_with("text/html")
        );
        assert!(res.text().await.unwrap().contains("Confab"));
    }
}
