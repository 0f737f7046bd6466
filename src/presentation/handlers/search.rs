use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::response::IntoResponse;
use serde::Deserialize;

use super::ApiError;
use crate::infrastructure::observability::sanitize_prompt;
use crate::presentation::state::AppState;

#[derive(Deserialize)]
pub struct SearchRequest {
    pub query: String,
    #[serde(default)]
    pub limit: i64,
}

#[tracing::instrument(skip(state, payload))]
pub async fn search_handler(
    State(state): State<AppState>,
    payload: Result<Json<SearchRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(request) = payload?;
    tracing::debug!(query = %sanitize_prompt(&request.query), "Processing search");

    let results = state
        .rag_service
        .search_similar(&request.query, request.limit)
        .await
        .map_err(|e| ApiError::from_rag(e, "Failed to search"))?;

    tracing::info!(results = results.len(), "Search successful");
    Ok(Json(results))
}
