//! Fan-out timing and timeout behavior against real HTTP upstreams.

use crate::helpers::*;
use crate::mock_providers::*;
use axum::http::StatusCode;
use serde_json::json;
use std::time::{Duration, Instant};

/// Five agents, each upstream delayed 300ms: total latency must track the
/// slowest call, not the 1.5s a sequential loop would need.
#[tokio::test]
async fn test_fanout_latency_bounded_by_slowest_call() {
    let delay = Duration::from_millis(300);
    let openai = MockUpstream::start().await;
    let openrouter = MockUpstream::start().await;
    openai.mock_chat_delayed("slow hello", delay).await;
    openrouter.mock_chat_delayed("slow hi", delay).await;

    let app = test_app(&openai.url(), &openrouter.url());

    let start = Instant::now();
    let response = post_json(
        app,
        "/api/chat",
        &json!({
            "message": "Hello",
            "agents": ["claude3.5", "chatgpt4", "llama3.3", "mistral", "gemini"]
        }),
    )
    .await;
    let elapsed = start.elapsed();

    let body = json_body(response, StatusCode::OK).await;
    assert_eq!(body["metadata"]["successful_responses"], 5);
    assert!(
        elapsed < Duration::from_millis(900),
        "fan-out took {elapsed:?}, expected concurrent upstream calls"
    );
}

/// A stalled upstream times out with its own classification while a fast
/// upstream's result is returned intact.
#[tokio::test]
async fn test_slow_upstream_times_out_independently() {
    let openai = MockUpstream::start().await;
    let openrouter = MockUpstream::start().await;
    openai
        .mock_chat_delayed("too late", Duration::from_secs(5))
        .await;
    openrouter.mock_chat("Hi").await;

    let app = test_app_with_timeout(
        &openai.url(),
        &openrouter.url(),
        Duration::from_millis(400),
    );

    let response = post_json(
        app,
        "/api/chat",
        &json!({"message": "Hello", "agents": ["claude3.5", "chatgpt4"]}),
    )
    .await;

    let body = json_body(response, StatusCode::OK).await;
    assert_eq!(body["responses"]["claude3.5"]["status"], "success");
    assert_eq!(body["responses"]["chatgpt4"]["status"], "error");
    assert_eq!(body["responses"]["chatgpt4"]["classification"], "timeout");
}

/// Duplicated ids in the request produce exactly one upstream call and one
/// response entry.
#[tokio::test]
async fn test_duplicates_fan_out_once() {
    let openai = MockUpstream::start().await;
    let openrouter = MockUpstream::start().await;
    openrouter.mock_chat("Hi").await;

    let app = test_app(&openai.url(), &openrouter.url());
    let response = post_json(
        app,
        "/api/chat",
        &json!({"message": "Hello", "agents": ["claude3.5", "claude3.5"]}),
    )
    .await;

    let body = json_body(response, StatusCode::OK).await;
    assert_eq!(body["responses"].as_object().unwrap().len(), 1);
    assert_eq!(openrouter.received_requests().await, 1);
}
