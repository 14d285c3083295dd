//! Integration test: run the relay against a mock Gemini server on an ephemeral port.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::Value;
use tutor_core::config::RelayConfig;
use tutor_core::prompt::TUTOR_INSTRUCTION;
use tutor_core::relay::{GeminiRelay, Tutor};

#[derive(Clone, Default)]
struct Seen {
    requests: Arc<Mutex<Vec<(String, HashMap<String, String>, Value)>>>,
}

/// Starts a mock `generateContent` endpoint that replies with `status` and `body`.
async fn mock_gemini(status: StatusCode, body: &'static str) -> (String, Seen) {
    let seen = Seen::default();

    let app = Router::new()
        .route(
            "/v1beta/models/{action}",
            post(
                move |State(seen): State<Seen>,
                      Path(action): Path<String>,
                      Query(query): Query<HashMap<String, String>>,
                      Json(payload): Json<Value>| async move {
                    seen.requests
                        .lock()
                        .expect("lock")
                        .push((action, query, payload));
                    (status, [("content-type", "application/json")], body)
                },
            ),
        )
        .with_state(seen.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind mock");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("mock server");
    });

    (format!("http://{addr}/v1beta"), seen)
}

fn relay_for(base_url: String) -> GeminiRelay {
    GeminiRelay::new(RelayConfig {
        api_key: Some("test-key".into()),
        base_url,
        model: "gemini-2.0-flash".into(),
    })
}

#[tokio::test]
async fn relays_answer_text_from_first_candidate() {
    let (base_url, seen) = mock_gemini(
        StatusCode::OK,
        r#"{"candidates":[{"content":{"parts":[{"text":"A stack is LIFO."}]}}]}"#,
    )
    .await;

    let answer = relay_for(base_url).ask("What is a stack?").await;
    assert_eq!(answer, "A stack is LIFO.");

    let requests = seen.requests.lock().expect("lock");
    assert_eq!(requests.len(), 1);
    let (action, query, payload) = &requests[0];
    assert_eq!(action, "gemini-2.0-flash:generateContent");
    assert_eq!(query.get("key").map(String::as_str), Some("test-key"));
    assert_eq!(payload["contents"][0]["role"], "user");
    let text = payload["contents"][0]["parts"][0]["text"]
        .as_str()
        .expect("prompt text");
    assert!(text.starts_with(TUTOR_INSTRUCTION));
    assert!(text.ends_with("\nWhat is a stack?"));
}

#[tokio::test]
async fn upstream_error_payload_is_embedded_in_diagnostic() {
    let body = r#"{"error":{"code":429,"message":"Resource exhausted"}}"#;
    let (base_url, _) = mock_gemini(StatusCode::TOO_MANY_REQUESTS, body).await;

    let answer = relay_for(base_url).ask("What is a queue?").await;
    assert!(answer.starts_with("⚠️ Unexpected Gemini response:\n"));
    assert!(answer.contains("Resource exhausted"));
}

#[tokio::test]
async fn unreachable_upstream_is_a_soft_failure() {
    // Reserve a port, then free it so nothing is listening there.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);

    let answer = relay_for(format!("http://{addr}/v1beta")).ask("Hello?").await;
    assert!(
        answer.starts_with("⚠️ Gemini request failed: "),
        "unexpected answer: {answer}"
    );
}

#[tokio::test]
async fn failures_come_back_as_diagnostics() {
    let (base_url, _) = mock_gemini(StatusCode::OK, "not json at all").await;
    let answer = relay_for(base_url).ask("anything").await;
    assert_eq!(answer, "⚠️ Raw Gemini API response:\nnot json at all");

    let unconfigured = GeminiRelay::new(RelayConfig::default());
    assert!(!unconfigured.ask("anything").await.is_empty());
}

