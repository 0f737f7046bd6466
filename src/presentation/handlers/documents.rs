use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::{Deserialize, Serialize};

use super::ApiError;
use crate::domain::{DocumentId, Metadata};
use crate::presentation::state::AppState;

#[derive(Deserialize)]
pub struct CreateDocumentRequest {
    pub content: String,
    #[serde(default)]
    pub metadata: Metadata,
}

#[derive(Serialize)]
pub struct CreateDocumentResponse {
    pub id: DocumentId,
}

/// Raw query values; anything unparsable falls back to the service defaults.
#[derive(Deserialize)]
pub struct ListDocumentsParams {
    pub limit: Option<String>,
    pub offset: Option<String>,
}

fn parse_or_zero(value: Option<&str>) -> i64 {
    value.and_then(|v| v.trim().parse().ok()).unwrap_or(0)
}

fn parse_document_id(raw: &str) -> Result<DocumentId, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::bad_request("Invalid document ID format"))
}

#[tracing::instrument(skip(state, payload))]
pub async fn create_document_handler(
    State(state): State<AppState>,
    payload: Result<Json<CreateDocumentRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(request) = payload?;

    let id = state
        .rag_service
        .add_document(&request.content, request.metadata)
        .await
        .map_err(|e| ApiError::from_rag(e, "Failed to store document"))?;

    Ok((StatusCode::CREATED, Json(CreateDocumentResponse { id })))
}

#[tracing::instrument(skip(state, params))]
pub async fn list_documents_handler(
    State(state): State<AppState>,
    Query(params): Query<ListDocumentsParams>,
) -> Result<impl IntoResponse, ApiError> {
    let limit = parse_or_zero(params.limit.as_deref());
    let offset = parse_or_zero(params.offset.as_deref());

    let documents = state
        .rag_service
        .list_documents(limit, offset)
        .await
        .map_err(|e| ApiError::from_rag(e, "Failed to list documents"))?;

    Ok(Json(documents))
}

#[tracing::instrument(skip(state))]
pub async fn get_document_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_document_id(&id)?;

    let document = state
        .rag_service
        .get_document(id)
        .await
        .map_err(|e| ApiError::from_rag(e, "Failed to get document"))?;

    Ok(Json(document))
}

#[tracing::instrument(skip(state))]
pub async fn delete_document_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_document_id(&id)?;

    state
        .rag_service
        .delete_document(id)
        .await
        .map_err(|e| ApiError::from_rag(e, "Failed to delete document"))?;

    Ok(StatusCode::NO_CONTENT)
}
