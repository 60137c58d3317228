pub mod config;
pub mod db;
pub mod errors;
pub mod models;
pub mod routes;
pub mod services;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;


use axum::{extract::State, http::StatusCode, response::Json, routing::get, Router};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::warn;

use config::Config;
use db::MemoRepository;

#[derive(Clone)]
pub struct AppState {
    pub memos: MemoRepository,
    pub config: Config,
}

/// Health check endpoint for monitoring
pub async fn health_check(
    State(state): State<Arc<AppState>>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    match state.memos.health_check().await {
        Ok(info) => Ok(Json(serde_json::json!({
            "status": "ok",
            "database": info.db_name,
            "doc_count": info.doc_count
        }))),
        Err(e) => {
            warn!("Health check failed: {}", e);
            Err(StatusCode::SERVICE_UNAVAILABLE)
        }
    }
}

/// Builds the HTTP API around the given state
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/health", get(health_check))
        .nest("/api/memos", routes::memos::router())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
