use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;

use ragserve::application::ports::DocumentStore;
use ragserve::application::services::RagService;
use ragserve::infrastructure::llm::{GeminiClient, GeminiEmbedder};
use ragserve::infrastructure::observability::{TracingConfig, init_tracing};
use ragserve::infrastructure::persistence::PgDocumentStore;
use ragserve::presentation::{AppState, Settings, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().context("Failed to load configuration")?;

    init_tracing(&TracingConfig::new(
        settings.environment.as_str(),
        settings.logging.json_format(),
        settings.logging.level.clone(),
    ));

    if settings.chunking.overlap_exceeds_size() {
        tracing::warn!(
            chunk_size = settings.chunking.max_chunk_size,
            chunk_overlap = settings.chunking.chunk_overlap,
            "Chunk overlap is not smaller than chunk size"
        );
    }

    let store = Arc::new(PgDocumentStore::new(
        settings.database.connection_string(),
        settings.database.max_connections,
        settings.embeddings.dimensions,
    ));
    store
        .connect()
        .await
        .context("Failed to connect to database")?;

    let embedder = Arc::new(GeminiEmbedder::with_base_url(
        settings.gemini.api_key.clone(),
        settings.gemini.embedding_model.clone(),
        settings.gemini.base_url.clone(),
    )?);
    let llm_client = Arc::new(GeminiClient::with_base_url(
        settings.gemini.api_key.clone(),
        settings.gemini.text_model.clone(),
        settings.gemini.base_url.clone(),
    )?);

    let rag_service = Arc::new(RagService::new(
        embedder,
        Arc::clone(&store) as Arc<dyn DocumentStore>,
        llm_client,
    ));

    let router = create_router(AppState::new(rag_service));

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!(
        address = %addr,
        environment = %settings.environment,
        "API server listening"
    );

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Shutting down");
    store.close().await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
