//! Route definitions for the backend API.

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, middleware, state::AppState};

/// Create the main API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health_check))
        .nest("/api", api_routes())
        // Apply middleware
        .layer(axum::middleware::from_fn(middleware::request_id_middleware))
        .layer(axum::middleware::from_fn(middleware::logging_middleware))
        .layer(middleware::cors_layer())
        // Add state
        .with_state(state)
}

/// Routes under `/api`
fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/agents", get(handlers::list_agents))
        .route("/agents/:agent_id", get(handlers::get_agent))
        .route("/chat", post(handlers::chat))
        .route("/chat/single", post(handlers::chat_single))
        .route("/chat/models", get(handlers::list_models))
        .route("/workflows", get(handlers::list_workflows))
        .route("/workflows/categories", get(handlers::workflow_categories))
        .route("/workflows/stats", get(handlers::workflow_stats))
        .route("/workflows/:workflow_id", get(handlers::get_workflow))
        .route(
            "/workflows/:workflow_id/execute",
            post(handlers::execute_workflow),
        )
        .route("/monitoring/stats", get(handlers::monitoring_stats))
}
