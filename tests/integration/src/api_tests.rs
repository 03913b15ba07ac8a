//! API endpoint integration tests
//!
//! Drives the full router in-process against wiremock upstreams.

use crate::helpers::*;
use crate::mock_providers::*;
use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;

/// The README example: two agents, two providers, one keyed response each.
#[tokio::test]
async fn test_chat_fans_out_to_both_providers() {
    let openai = MockUpstream::start().await;
    let openrouter = MockUpstream::start().await;
    openai.mock_chat("Hello there").await;
    openrouter.mock_chat("Hi").await;

    let app = test_app(&openai.url(), &openrouter.url());
    let response = post_json(
        app,
        "/api/chat",
        &json!({"message": "Hello", "agents": ["claude3.5", "chatgpt4"]}),
    )
    .await;

    let body = json_body(response, StatusCode::OK).await;
    assert_eq!(body["success"], true);
    let responses = body["responses"].as_object().unwrap();
    assert_eq!(responses.len(), 2);
    assert_eq!(responses["claude3.5"]["status"], "success");
    assert_eq!(responses["claude3.5"]["response"], "Hi");
    assert_eq!(responses["chatgpt4"]["status"], "success");
    assert_eq!(responses["chatgpt4"]["response"], "Hello there");
    assert_eq!(body["metadata"]["total_agents"], 2);
    assert_eq!(body["metadata"]["successful_responses"], 2);

    assert_eq!(openai.received_requests().await, 1);
    assert_eq!(openrouter.received_requests().await, 1);
}

/// One provider failing must not disturb the other's result.
#[tokio::test]
async fn test_failure_isolation_across_providers() {
    let openai = MockUpstream::start().await;
    let openrouter = MockUpstream::start().await;
    openai.mock_server_error().await;
    openrouter.mock_chat("Hi").await;

    let app = test_app(&openai.url(), &openrouter.url());
    let response = post_json(
        app,
        "/api/chat",
        &json!({"message": "Hello", "agents": ["claude3.5", "chatgpt4"]}),
    )
    .await;

    let body = json_body(response, StatusCode::OK).await;
    let responses = body["responses"].as_object().unwrap();
    assert_eq!(responses["claude3.5"]["status"], "success");
    assert_eq!(responses["claude3.5"]["response"], "Hi");
    assert_eq!(responses["chatgpt4"]["status"], "error");
    assert_eq!(responses["chatgpt4"]["kind"], "upstream_failure");
    assert_eq!(responses["chatgpt4"]["classification"], "unavailable");
    assert_eq!(body["metadata"]["successful_responses"], 1);
}

/// 429 upstream maps to the rate_limited classification.
#[tokio::test]
async fn test_rate_limit_classification() {
    let openai = MockUpstream::start().await;
    let openrouter = MockUpstream::start().await;
    openrouter.mock_rate_limit().await;

    let app = test_app(&openai.url(), &openrouter.url());
    let response = post_json(
        app,
        "/api/chat",
        &json!({"message": "Hello", "agents": ["mistral"]}),
    )
    .await;

    let body = json_body(response, StatusCode::OK).await;
    assert_eq!(body["responses"]["mistral"]["classification"], "rate_limited");
}

/// 401 upstream maps to the auth_failed classification.
#[tokio::test]
async fn test_auth_error_classification() {
    let openai = MockUpstream::start().await;
    let openrouter = MockUpstream::start().await;
    openai.mock_auth_error().await;

    let app = test_app(&openai.url(), &openrouter.url());
    let response = post_json(
        app,
        "/api/chat",
        &json!({"message": "Hello", "agents": ["chatgpt4"]}),
    )
    .await;

    let body = json_body(response, StatusCode::OK).await;
    assert_eq!(body["responses"]["chatgpt4"]["classification"], "auth_failed");
}

/// A 200 with an unparseable body maps to malformed_response.
#[tokio::test]
async fn test_malformed_body_classification() {
    let openai = MockUpstream::start().await;
    let openrouter = MockUpstream::start().await;
    openrouter.mock_garbage().await;

    let app = test_app(&openai.url(), &openrouter.url());
    let response = post_json(
        app,
        "/api/chat",
        &json!({"message": "Hello", "agents": ["gemini"]}),
    )
    .await;

    let body = json_body(response, StatusCode::OK).await;
    assert_eq!(
        body["responses"]["gemini"]["classification"],
        "malformed_response"
    );
}

/// Unknown ids degrade to per-entry errors beside healthy entries.
#[tokio::test]
async fn test_unknown_agent_beside_known_agent() {
    let openai = MockUpstream::start().await;
    let openrouter = MockUpstream::start().await;
    openrouter.mock_chat("Hi").await;

    let app = test_app(&openai.url(), &openrouter.url());
    let response = post_json(
        app,
        "/api/chat",
        &json!({"message": "Hello", "agents": ["claude3.5", "gpt99"]}),
    )
    .await;

    let body = json_body(response, StatusCode::OK).await;
    let responses = body["responses"].as_object().unwrap();
    assert_eq!(responses.len(), 2);
    assert_eq!(responses["claude3.5"]["status"], "success");
    assert_eq!(responses["gpt99"]["kind"], "unknown_agent");
}

/// An empty agent set is a request-level 400, not a partial response.
#[tokio::test]
async fn test_empty_agent_set_is_400() {
    let openai = MockUpstream::start().await;
    let openrouter = MockUpstream::start().await;

    let app = test_app(&openai.url(), &openrouter.url());
    let response = post_json(
        app,
        "/api/chat",
        &json!({"message": "Hello", "agents": []}),
    )
    .await;

    let body = json_body(response, StatusCode::BAD_REQUEST).await;
    assert_eq!(body["success"], false);
}

/// Single-agent convenience endpoint.
#[tokio::test]
async fn test_chat_single() {
    let openai = MockUpstream::start().await;
    let openrouter = MockUpstream::start().await;
    openrouter.mock_chat("On it").await;

    let app = test_app(&openai.url(), &openrouter.url());
    let response = post_json(
        app,
        "/api/chat/single",
        &json!({"message": "Hello", "agent": "llama3.3"}),
    )
    .await;

    let body = json_body(response, StatusCode::OK).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["response"]["status"], "success");
    assert_eq!(body["response"]["response"], "On it");
}

/// The tracker counts fan-outs and per-agent outcomes.
#[tokio::test]
async fn test_monitoring_reflects_traffic() {
    let openai = MockUpstream::start().await;
    let openrouter = MockUpstream::start().await;
    openai.mock_server_error().await;
    openrouter.mock_chat("Hi").await;

    // Reuse one app instance so the counters accumulate.
    let app = test_app(&openai.url(), &openrouter.url());

    let response = post_json(
        app.clone(),
        "/api/chat",
        &json!({"message": "Hello", "agents": ["claude3.5", "chatgpt4"]}),
    )
    .await;
    json_body(response, StatusCode::OK).await;

    let stats = json_body(get(app, "/api/monitoring/stats").await, StatusCode::OK).await;
    assert_eq!(stats["chat_requests"], 1);
    assert_eq!(stats["agent_successes"], 1);
    assert_eq!(stats["agent_failures"], 1);
    assert_eq!(stats["per_agent_successes"]["claude3.5"], 1);
    assert_eq!(stats["per_agent_failures"]["chatgpt4"], 1);
}
