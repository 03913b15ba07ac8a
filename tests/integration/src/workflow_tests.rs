//! Workflow endpoint tests.

use crate::helpers::*;
use crate::mock_providers::*;
use axum::http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_workflow_catalog_and_detail() {
    let openai = MockUpstream::start().await;
    let openrouter = MockUpstream::start().await;
    let app = test_app(&openai.url(), &openrouter.url());

    let catalog = json_body(get(app.clone(), "/api/workflows").await, StatusCode::OK).await;
    assert_eq!(catalog["success"], true);
    assert_eq!(catalog["total"], 2);

    let detail = json_body(
        get(app.clone(), "/api/workflows/strategic-planning").await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(detail["id"], "strategic-planning");
    assert_eq!(detail["tasks"].as_array().unwrap().len(), 4);

    let missing = get(app, "/api/workflows/nope").await;
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_workflow_execution_runs_every_step() {
    let openai = MockUpstream::start().await;
    let openrouter = MockUpstream::start().await;
    openai.mock_chat("openai answer").await;
    openrouter.mock_chat("openrouter answer").await;

    let app = test_app(&openai.url(), &openrouter.url());
    let response = post_json(
        app,
        "/api/workflows/strategic-planning/execute",
        &json!({"input": "opening a bakery"}),
    )
    .await;

    let body = json_body(response, StatusCode::OK).await;
    assert_eq!(body["workflow_id"], "strategic-planning");
    let steps = body["steps"].as_array().unwrap();
    assert_eq!(steps.len(), 4);
    for step in steps {
        let prompt = step["prompt"].as_str().unwrap();
        assert!(prompt.contains("opening a bakery"));
        for (_, result) in step["responses"].as_object().unwrap() {
            assert_eq!(result["status"], "success");
        }
    }
}

#[tokio::test]
async fn test_workflow_execution_empty_input_is_400() {
    let openai = MockUpstream::start().await;
    let openrouter = MockUpstream::start().await;
    let app = test_app(&openai.url(), &openrouter.url());

    let response = post_json(
        app,
        "/api/workflows/strategic-planning/execute",
        &json!({"input": "  "}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
