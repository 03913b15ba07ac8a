//! Test helper utilities for integration tests

use axum::body::Body;
use axum::http::{header, Method, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use once_cell::sync::Lazy;
use promptlink_config::{BackendConfig, UpstreamConfig};
use promptlink_core::agent::default_agents;
use promptlink_core::{ChatProvider, ProviderKind};
use promptlink_providers::{
    AgentRegistry, OpenAiConfig, OpenAiProvider, OpenRouterConfig, OpenRouterProvider,
};
use promptlink_server::{create_router, AppState};
use secrecy::SecretString;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;
use tracing_subscriber::EnvFilter;

/// Initialize tracing for tests (only once, opt-in via TEST_LOG)
static TRACING: Lazy<()> = Lazy::new(|| {
    if std::env::var("TEST_LOG").is_ok() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    }
});

/// Force tracing initialization
pub fn init_tracing() {
    Lazy::force(&TRACING);
}

/// Build a router whose five default agents point at mock upstreams.
pub fn test_app(openai_url: &str, openrouter_url: &str) -> Router {
    test_app_with_timeout(openai_url, openrouter_url, Duration::from_secs(5))
}

/// Build a router with a custom per-call upstream timeout.
pub fn test_app_with_timeout(
    openai_url: &str,
    openrouter_url: &str,
    timeout: Duration,
) -> Router {
    init_tracing();

    let openai: Arc<dyn ChatProvider> = Arc::new(
        OpenAiProvider::new(
            OpenAiConfig::new(Some(SecretString::new("test-openai-key".to_string())))
                .with_base_url(openai_url)
                .with_timeout(timeout + Duration::from_secs(1)),
        )
        .expect("openai provider"),
    );
    let openrouter: Arc<dyn ChatProvider> = Arc::new(
        OpenRouterProvider::new(
            OpenRouterConfig::new(
                Some(SecretString::new("test-openrouter-key".to_string())),
                "https://promptlink.test",
            )
            .with_base_url(openrouter_url)
            .with_timeout(timeout + Duration::from_secs(1)),
        )
        .expect("openrouter provider"),
    );

    let mut registry = AgentRegistry::new();
    for definition in default_agents() {
        let provider = match definition.provider {
            ProviderKind::OpenAi => Arc::clone(&openai),
            ProviderKind::OpenRouter => Arc::clone(&openrouter),
        };
        registry.register(definition, provider);
    }

    let config = BackendConfig {
        upstream: UpstreamConfig {
            timeout,
            ..UpstreamConfig::default()
        },
        ..BackendConfig::default()
    };

    let state = AppState::builder().config(config).registry(registry).build();
    create_router(state)
}

/// POST a JSON body to the router and return the response.
pub async fn post_json(app: Router, uri: &str, body: &Value) -> Response<axum::body::Body> {
    app.oneshot(
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("request"),
    )
    .await
    .expect("response")
}

/// GET a path from the router and return the response.
pub async fn get(app: Router, uri: &str) -> Response<axum::body::Body> {
    app.oneshot(Request::builder().uri(uri).body(Body::empty()).expect("request"))
        .await
        .expect("response")
}

/// Assert a status code and decode the JSON body.
pub async fn json_body(response: Response<axum::body::Body>, expected: StatusCode) -> Value {
    assert_eq!(response.status(), expected);
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("json body")
}
