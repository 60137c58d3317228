use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::{delete, get},
    Router,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

use crate::{
    errors::ApiError,
    models::{Document, DocumentResponse, ViewResponse},
    AppState,
};

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_memos).post(save_memo))
        .route("/search", get(search_memos))
        .route("/{id}", delete(remove_memo))
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RevisionQuery {
    pub rev: Option<String>,
}

/// List all memos, newest first
pub async fn list_memos(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ViewResponse>, ApiError> {
    Ok(Json(state.memos.list().await?))
}

/// Full-text search over memos
pub async fn search_memos(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<ViewResponse>, ApiError> {
    let q = query
        .q
        .filter(|q| !q.trim().is_empty())
        .ok_or_else(|| ApiError::bad_request("Query parameter 'q' is required"))?;

    Ok(Json(state.memos.search(&q).await?))
}

/// Create or update a memo
pub async fn save_memo(
    State(state): State<Arc<AppState>>,
    Json(doc): Json<Document>,
) -> Result<Json<DocumentResponse>, ApiError> {
    if !doc.is_object() {
        return Err(ApiError::bad_request("A memo must be a JSON object"));
    }

    let saved = state.memos.save(&doc).await?;
    info!("Memo {} saved at revision {}", saved.id, saved.rev);
    Ok(Json(saved))
}

/// Delete a memo revision
pub async fn remove_memo(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Query(query): Query<RevisionQuery>,
) -> Result<Json<DocumentResponse>, ApiError> {
    let rev = query
        .rev
        .filter(|rev| !rev.is_empty())
        .ok_or_else(|| ApiError::bad_request("Query parameter 'rev' is required"))?;

    let removed = state.memos.remove(&id, &rev).await?;
    info!("Memo {} removed", removed.id);
    Ok(Json(removed))
}
