//! End-to-end integration tests for the Folio chat gateway.
//!
//! These tests drive the full router (CORS, body limit, parsing, latency,
//! classifier) the way the portfolio front-end does.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use folio_config::{AppConfig, LatencyConfig};
use folio_core::KnowledgeBase;
use folio_gateway::{GatewayState, build_router, cors};

// ── Helpers ──────────────────────────────────────────────────────────────

fn app(latency: LatencyConfig) -> Router {
    let mut config = AppConfig::default();
    config.latency = latency;
    app_from(&config)
}

fn app_from(config: &AppConfig) -> Router {
    let state = GatewayState::from_config(config).expect("state should build");
    build_router(Arc::new(state), config.gateway.max_body_bytes)
}

fn chat(message: &str) -> Request<Body> {
    let body = serde_json::json!({ "message": message });
    raw_post(&body.to_string())
}

fn raw_post(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn send(app: Router, req: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

async fn confidence_of(message: &str) -> f64 {
    let (status, body) = send(app(LatencyConfig::disabled()), chat(message)).await;
    assert_eq!(status, StatusCode::OK, "message {message:?}");
    body["confidence"].as_f64().unwrap()
}

// ── E2E: Chat replies ────────────────────────────────────────────────────

#[tokio::test]
async fn e2e_skills_question() {
    let (status, body) = send(
        app(LatencyConfig::disabled()),
        chat("What are your skills?"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["confidence"], 0.92);
    let text = body["response"].as_str().unwrap();
    assert!(text.contains("Programming Languages"));
    assert!(text.contains("C, C++, Java, Python"));
    assert_eq!(body["model"], "Llama-Enhanced-Assistant-v1.0");
    assert!(body["timestamp"].as_str().unwrap().ends_with('Z'));
    assert_eq!(body["suggestions"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn e2e_project_reply_names_every_project() {
    let (status, body) = send(
        app(LatencyConfig::disabled()),
        chat("Show me a PROJECT you're proud of"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["confidence"], 0.95);
    let text = body["response"].as_str().unwrap();
    for project in &KnowledgeBase::builtin().projects {
        assert!(text.contains(&project.name), "missing {}", project.name);
    }
}

#[tokio::test]
async fn e2e_each_branch_confidence() {
    assert_eq!(confidence_of("tell me about your education").await, 0.90);
    assert_eq!(confidence_of("what's your phone number").await, 0.98);
    assert_eq!(confidence_of("do you do ML?").await, 0.94);
    assert_eq!(confidence_of("any job openings you'd consider?").await, 0.93);
    assert_eq!(confidence_of("hey there").await, 0.88);
    assert_eq!(confidence_of("what's your favourite colour?").await, 0.75);
}

/// `work` is listed by both the projects rule and the hiring rule. The
/// projects rule is evaluated first, so any message containing `work`
/// gets the project summary. This is observed behavior, kept on purpose.
#[tokio::test]
async fn e2e_work_routes_to_projects_not_hiring() {
    assert_eq!(confidence_of("work on a project").await, 0.95);
    assert_eq!(confidence_of("Are you looking for work?").await, 0.95);
    assert_eq!(confidence_of("I want to hire you for some work").await, 0.95);

    // No `work`: the hiring rule is reachable.
    assert_eq!(confidence_of("hire me").await, 0.93);
}

#[tokio::test]
async fn e2e_replies_are_deterministic() {
    let app = app(LatencyConfig::disabled());
    let (_, first) = send(app.clone(), chat("How can I contact you?")).await;
    let (_, second) = send(app, chat("How can I contact you?")).await;

    assert_eq!(first["response"], second["response"]);
    assert_eq!(first["confidence"], second["confidence"]);
    assert_eq!(first["suggestions"], second["suggestions"]);
}

#[tokio::test]
async fn e2e_history_and_context_are_accepted() {
    let body = serde_json::json!({
        "message": "hello",
        "context": "portfolio-home",
        "conversationHistory": [
            {"role": "user", "content": "Tell me about your projects"},
            {"role": "assistant", "content": "Sure!"}
        ]
    });

    let (status, json) = send(app(LatencyConfig::disabled()), raw_post(&body.to_string())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["confidence"], 0.88);
}

// ── E2E: Errors ──────────────────────────────────────────────────────────

#[tokio::test]
async fn e2e_missing_message_is_400() {
    let (status, body) = send(app(LatencyConfig::disabled()), raw_post("{}")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, serde_json::json!({ "error": "Message is required" }));
}

#[tokio::test]
async fn e2e_empty_message_is_400() {
    let (status, body) = send(app(LatencyConfig::disabled()), chat("")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Message is required");
}

#[tokio::test]
async fn e2e_malformed_json_is_500_with_fallback() {
    let response = app(LatencyConfig::disabled())
        .oneshot(raw_post("{message: hi}"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let headers = response.headers();
    assert_eq!(headers["access-control-allow-origin"], "*");
    assert_eq!(headers["access-control-allow-methods"], cors::ALLOW_METHODS);
    assert_eq!(headers["access-control-allow-headers"], cors::ALLOW_HEADERS);

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["fallback"], true);
    assert_eq!(body["error"], folio_gateway::chat::APOLOGY);
}

#[test]
fn e2e_inverted_latency_config_is_rejected() {
    let mut config = AppConfig::default();
    config.latency = LatencyConfig {
        enabled: true,
        min_ms: 500,
        max_ms: 100,
    };
    assert!(GatewayState::from_config(&config).is_err());
}

#[tokio::test]
async fn e2e_options_preflight() {
    let req = Request::builder()
        .method("OPTIONS")
        .uri("/")
        .header("origin", "https://portfolio.example")
        .header("access-control-request-method", "POST")
        .body(Body::empty())
        .unwrap();

    let response = app(LatencyConfig::fixed(2000)).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["access-control-allow-origin"], "*");
    assert_eq!(response.headers()["access-control-allow-methods"], cors::ALLOW_METHODS);
    assert_eq!(response.headers()["access-control-allow-headers"], cors::ALLOW_HEADERS);
    let body = response.into_body().collect().await.unwrap().to_bytes();
    assert!(body.is_empty());
}

// ── E2E: Latency ─────────────────────────────────────────────────────────

#[tokio::test(start_paused = true)]
async fn e2e_latency_does_not_block_concurrent_requests() {
    let app = app(LatencyConfig::fixed(1000));
    let started = tokio::time::Instant::now();

    let (a, b) = tokio::join!(
        send(app.clone(), chat("projects")),
        send(app.clone(), chat("skills")),
    );

    assert_eq!(a.0, StatusCode::OK);
    assert_eq!(b.0, StatusCode::OK);

    let elapsed = started.elapsed();
    assert!(elapsed >= Duration::from_millis(1000));
    assert!(elapsed < Duration::from_millis(2000), "requests were serialized: {elapsed:?}");
}

#[tokio::test(start_paused = true)]
async fn e2e_validation_errors_skip_latency() {
    let app = app(LatencyConfig::fixed(3000));
    let started = tokio::time::Instant::now();

    let (status, _) = send(app, raw_post(r#"{"message": ""}"#)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(started.elapsed() < Duration::from_millis(3000));
}

// ── E2E: Custom knowledge base ───────────────────────────────────────────

#[tokio::test]
async fn e2e_custom_knowledge_file() {
    let dir = std::env::temp_dir().join(format!("folio-e2e-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("owner.toml");

    let mut kb = KnowledgeBase::builtin().clone();
    kb.personal.name = "Jane Doe".into();
    kb.projects[0].name = "Tide Tables".into();
    std::fs::write(&path, kb.to_toml().unwrap()).unwrap();

    let config = AppConfig {
        knowledge_path: Some(path.clone()),
        latency: LatencyConfig::disabled(),
        ..AppConfig::default()
    };
    let app = app_from(&config);

    let (_, projects) = send(app.clone(), chat("projects")).await;
    assert!(projects["response"].as_str().unwrap().contains("Tide Tables"));

    let (_, hello) = send(app.clone(), chat("hello")).await;
    assert!(hello["response"].as_str().unwrap().contains("Jane Doe's portfolio"));

    let profile = Request::builder()
        .uri("/profile")
        .body(Body::empty())
        .unwrap();
    let (status, json) = send(app, profile).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["personal"]["name"], "Jane Doe");

    std::fs::remove_dir_all(&dir).ok();
}
