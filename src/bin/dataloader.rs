use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, bail};
use chrono::Utc;
use clap::Parser;
use serde_json::Value;
use tokio_util::sync::CancellationToken;

use ragserve::application::ports::DocumentStore;
use ragserve::application::services::{IngestionError, IngestionService};
use ragserve::domain::{ChunkingOptions, ChunkingStrategy, Metadata};
use ragserve::infrastructure::llm::GeminiEmbedder;
use ragserve::infrastructure::observability::{TracingConfig, init_tracing};
use ragserve::infrastructure::persistence::PgDocumentStore;
use ragserve::infrastructure::text_processing::{PlainTextAdapter, TextSplitterFactory};
use ragserve::presentation::Settings;

/// Chunks text files, embeds every chunk and stores it in the document database.
#[derive(Debug, Parser)]
#[command(name = "dataloader", version)]
struct Args {
    /// Directory to walk recursively for .txt and .md files
    #[arg(long, conflicts_with = "file")]
    dir: Option<PathBuf>,

    /// Single file to load
    #[arg(long)]
    file: Option<PathBuf>,

    /// paragraph, sentence or fixed_size; defaults to CHUNK_STRATEGY
    #[arg(long)]
    strategy: Option<String>,

    /// Maximum chunk size in characters; defaults to CHUNK_SIZE
    #[arg(long)]
    chunk_size: Option<usize>,

    /// Overlap between chunks in characters; defaults to CHUNK_OVERLAP
    #[arg(long)]
    chunk_overlap: Option<usize>,
}

impl Args {
    fn chunking_options(&self, configured: ChunkingOptions) -> anyhow::Result<ChunkingOptions> {
        let strategy = match self.strategy.as_deref() {
            Some(name) => match ChunkingStrategy::parse_strict(name) {
                Some(strategy) => strategy,
                None => bail!("unknown chunking strategy '{name}'"),
            },
            None => configured.strategy,
        };

        let options = ChunkingOptions::new(
            strategy,
            self.chunk_size.unwrap_or(configured.max_chunk_size),
            self.chunk_overlap.unwrap_or(configured.chunk_overlap),
        );
        if options.max_chunk_size == 0 {
            bail!("--chunk-size must be greater than zero");
        }
        Ok(options)
    }
}

fn batch_metadata() -> Metadata {
    let mut metadata = Metadata::new();
    metadata.insert("loaded_by".to_string(), Value::from("data_loader"));
    metadata.insert(
        "batch_id".to_string(),
        Value::from(Utc::now().format("%Y%m%d-%H%M%S").to_string()),
    );
    metadata
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let path = match (&args.dir, &args.file) {
        (Some(dir), None) => dir.clone(),
        (None, Some(file)) => file.clone(),
        _ => bail!("either --dir or --file must be specified"),
    };

    let settings = Settings::load().context("Failed to load configuration")?;
    init_tracing(&TracingConfig::new(
        settings.environment.as_str(),
        settings.logging.json_format(),
        settings.logging.level.clone(),
    ));

    let options = args.chunking_options(settings.chunking.options())?;
    if options.chunk_overlap >= options.max_chunk_size {
        tracing::warn!(
            chunk_size = options.max_chunk_size,
            chunk_overlap = options.chunk_overlap,
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

    let cancellation = CancellationToken::new();
    let ctrl_c_token = cancellation.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupt received, finishing the current chunk");
            ctrl_c_token.cancel();
        }
    });

    let service = IngestionService::new(
        Arc::new(PlainTextAdapter),
        embedder,
        Arc::clone(&store) as Arc<dyn DocumentStore>,
        TextSplitterFactory::create(&options),
    )
    .with_cancellation(cancellation);

    tracing::info!(
        path = %path.display(),
        strategy = %options.strategy,
        chunk_size = options.max_chunk_size,
        chunk_overlap = options.chunk_overlap,
        "Starting data load"
    );

    let result = service.load_path(&path, &batch_metadata()).await;
    store.close().await?;

    match result {
        Ok(report) => {
            tracing::info!(
                files_processed = report.files_processed,
                files_skipped = report.files_skipped,
                chunks_stored = report.chunks_stored,
                "Data loading completed"
            );
            Ok(())
        }
        Err(IngestionError::Cancelled) => {
            tracing::warn!("Data loading cancelled");
            Ok(())
        }
        Err(e) => Err(e).with_context(|| format!("Failed to load {}", path.display())),
    }
}
