use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::response::IntoResponse;
use serde::Deserialize;

use super::ApiError;
use crate::infrastructure::observability::sanitize_prompt;
use crate::presentation::state::AppState;

#[derive(Deserialize)]
pub struct QueryRequest {
    pub query: String,
    #[serde(default)]
    pub limit: i64,
}

#[tracing::instrument(skip(state, payload))]
pub async fn query_handler(
    State(state): State<AppState>,
    payload: Result<Json<QueryRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(request) = payload?;
    tracing::debug!(query = %sanitize_prompt(&request.query), "Processing query");

    let response = state
        .rag_service
        .query(&request.query, request.limit)
        .await
        .map_err(|e| ApiError::from_rag(e, "Failed to process query"))?;

    tracing::info!(documents = response.documents.len(), "Query successful");
    Ok(Json(response))
}
