use axum::Router;
use axum::middleware;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::infrastructure::observability::request_id_middleware;
use crate::presentation::handlers::{
    create_document_handler, delete_document_handler, get_document_handler, health_handler,
    list_documents_handler, query_handler, search_handler,
};
use crate::presentation::state::AppState;

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    let api = Router::new()
        .route(
            "/documents",
            post(create_document_handler).get(list_documents_handler),
        )
        .route(
            "/documents/{id}",
            get(get_document_handler).delete(delete_document_handler),
        )
        .route("/search", post(search_handler))
        .route("/query", post(query_handler));

    Router::new()
        .route("/health", get(health_handler))
        .nest("/api", api)
        .layer(middleware::from_fn(request_id_middleware))
        .layer(trace_layer)
        .layer(cors)
        .with_state(state)
}
