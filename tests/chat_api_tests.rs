use axum::body::Body;
use axum::http::{Request, StatusCode};
use reqwest::Client;
use serde_json::{json, Value};
use tower::ServiceExt;
use url::Url;

use parley::ai::LlmClient;
use parley::rules::RuleEngine;
use parley::server::{create_router, AppState};
use parley::sources::{Finance, Geocoder, OpenLibrary, Reddit, Sources, Wikipedia};

/// Tests for the `/chat` endpoint and the static fallback
/// These drive the full router, with every data source pointed at a closed
/// port so fetch-backed rules reliably come up empty.

fn offline_sources() -> Sources {
    let http = Client::new();
    let base = Url::parse("http://127.0.0.1:1/").unwrap();
    Sources {
        wikipedia: Wikipedia::with_base(http.clone(), base.clone()),
        reddit: Reddit::with_base(http.clone(), base.clone()),
        finance: Finance::with_base(http.clone(), base.clone()),
        geocoder: Geocoder::with_base(http.clone(), base.clone()),
        openlibrary: OpenLibrary::with_base(http, base),
    }
}

fn rules_app(static_dir: &str) -> axum::Router {
    let engine = RuleEngine::new(offline_sources());
    create_router(AppState::with_rule_engine(engine), static_dir)
}

async fn post_chat(app: axum::Router, payload: &Value) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/chat")
                .header("content-type", "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    (status, body)
}

#[tokio::test]
async fn test_chat_answers_calculations() {
    let app = rules_app(".");

    let (status, body) = post_chat(app, &json!({ "prompt": "what is 2+2" })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "reply": "Result: 4" }),
        "Calculations should be answered inline"
    );
}

#[tokio::test]
async fn test_chat_echoes_unmatched_prompts() {
    let app = rules_app(".");

    let (status, body) = post_chat(app, &json!({ "prompt": "zzz qqq" })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "reply": "Echo: zzz qqq" }));
}

#[tokio::test]
async fn test_chat_greets_from_the_canned_pool() {
    let app = rules_app(".");

    let (status, body) = post_chat(app, &json!({ "prompt": "hello" })).await;

    assert_eq!(status, StatusCode::OK);
    let reply = body["reply"].as_str().unwrap();
    let greetings = [
        "Hello there! 😊",
        "Hey! How's it going? 👋",
        "Hiya! 👋 What's up?",
        "Greetings! 🤖",
        "Yo! Ready to chat? 😄",
        "Howdy partner! 🤠",
        "Hi! Hope you're having a great day! 🌟",
    ];
    assert!(
        greetings.iter().any(|greeting| reply.starts_with(greeting)),
        "Greeting should come from the canned pool, got: {reply}"
    );
}

#[tokio::test]
async fn test_chat_defaults_missing_fields() {
    let app = rules_app(".");

    // Neither prompt nor history is required.
    let (status, body) = post_chat(app, &json!({})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "reply": "Echo: " }));
}

#[tokio::test]
async fn test_chat_falls_back_to_echo_when_sources_are_down() {
    let app = rules_app(".");

    let (status, body) = post_chat(app, &json!({ "prompt": "tell me 3 jokes" })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "reply": "Echo: tell me 3 jokes" }),
        "List requests should fall through when the aggregator has nothing"
    );
}

#[tokio::test]
async fn test_provider_branch_failure_returns_500() {
    let client = LlmClient::with_endpoint(
        "test-key".to_string(),
        "gpt-3.5-turbo".to_string(),
        "http://127.0.0.1:1/v1".to_string(),
    );
    let app = create_router(AppState::with_provider(client), ".");

    let (status, body) = post_chat(app, &json!({ "prompt": "hello" })).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body,
        json!({ "error": "failed to contact AI" }),
        "Provider failures should surface as the fixed error body"
    );
}

#[tokio::test]
async fn test_static_fallback_serves_files() {
    let dir = std::env::temp_dir().join(format!("parley-static-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("hello.txt"), "hi from the static dir").unwrap();

    let app = rules_app(dir.to_str().unwrap());
    let response = app
        .oneshot(
            Request::builder()
                .uri("/hello.txt")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&bytes[..], b"hi from the static dir");
}

#[tokio::test]
async fn test_static_fallback_404s_on_missing_files() {
    let dir = std::env::temp_dir().join(format!("parley-empty-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();

    let app = rules_app(dir.to_str().unwrap());
    let response = app
        .oneshot(
            Request::builder()
                .uri("/no-such-file.txt")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
