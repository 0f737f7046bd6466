use std::fs;
use std::path::Path;
use std::sync::Arc;

use serde_json::json;
use tempfile::TempDir;
use tokio_util::sync::CancellationToken;

use ragserve::application::ports::{DocumentStore, Embedder, EmbedderError, FileLoaderError};
use ragserve::application::services::{IngestionError, IngestionReport, IngestionService};
use ragserve::domain::{
    CHUNK_COUNT_KEY, CHUNK_INDEX_KEY, ChunkingOptions, ChunkingStrategy, Embedding, Metadata,
};
use ragserve::infrastructure::llm::MockEmbedder;
use ragserve::infrastructure::persistence::InMemoryDocumentStore;
use ragserve::infrastructure::text_processing::{PlainTextAdapter, TextSplitterFactory};

fn service(embedder: MockEmbedder, store: Arc<InMemoryDocumentStore>) -> IngestionService {
    IngestionService::new(
        Arc::new(PlainTextAdapter),
        Arc::new(embedder),
        store,
        TextSplitterFactory::create(&ChunkingOptions::default()),
    )
}

fn base_metadata() -> Metadata {
    let mut base = Metadata::new();
    base.insert("loaded_by".to_string(), json!("data_loader"));
    base
}

fn write(dir: &Path, name: &str, contents: &[u8]) {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, contents).unwrap();
}

fn sample_tree() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "a.txt", b"Alpha notes.");
    write(dir.path(), "b.MD", b"Beta notes.\n\nMore beta.");
    write(dir.path(), "nested/c.txt", b"Gamma notes.");
    write(dir.path(), "data.json", b"{\"ignored\": true}");
    write(dir.path(), "main.rs", b"fn main() {}");
    write(dir.path(), "empty.txt", b"   \n");
    write(dir.path(), "broken.txt", &[0xff, 0xfe, 0xfd]);
    dir
}

#[tokio::test]
async fn given_directory_when_loading_then_processes_text_files_and_skips_failures() {
    let dir = sample_tree();
    let store = Arc::new(InMemoryDocumentStore::connected());
    let service = service(MockEmbedder::new(), Arc::clone(&store));

    let report = service
        .load_path(dir.path(), &base_metadata())
        .await
        .unwrap();

    assert_eq!(
        report,
        IngestionReport {
            files_processed: 3,
            files_skipped: 2,
            chunks_stored: 4,
        }
    );
    assert_eq!(store.len().await, 4);
}

#[tokio::test]
async fn given_directory_when_loading_then_chunks_carry_file_and_batch_metadata() {
    let dir = sample_tree();
    let store = Arc::new(InMemoryDocumentStore::connected());
    let service = service(MockEmbedder::new(), Arc::clone(&store));

    service
        .load_path(dir.path(), &base_metadata())
        .await
        .unwrap();

    let documents = store.list_documents(10, 0).await.unwrap();
    let beta: Vec<_> = documents
        .iter()
        .filter(|d| d.metadata["file_name"] == json!("b.MD"))
        .collect();
    assert_eq!(beta.len(), 2);
    for document in &beta {
        assert_eq!(document.metadata["source"], json!("file"));
        assert_eq!(document.metadata["file_ext"], json!(".MD"));
        assert_eq!(document.metadata["loaded_by"], json!("data_loader"));
        assert_eq!(document.metadata[CHUNK_COUNT_KEY], json!(2));
    }
    let mut indices: Vec<_> = beta
        .iter()
        .map(|d| d.metadata[CHUNK_INDEX_KEY].as_u64().unwrap())
        .collect();
    indices.sort();
    assert_eq!(indices, vec![0, 1]);
}

#[tokio::test]
async fn given_single_file_with_other_extension_when_loading_then_reads_it_as_text() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "notes.rst", b"Restructured notes.");
    let store = Arc::new(InMemoryDocumentStore::connected());
    let service = service(MockEmbedder::new(), Arc::clone(&store));

    let report = service
        .load_path(&dir.path().join("notes.rst"), &Metadata::new())
        .await
        .unwrap();

    assert_eq!(report.files_processed, 1);
    assert_eq!(report.chunks_stored, 1);
}

#[tokio::test]
async fn given_single_json_file_when_loading_then_reports_unsupported_type() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "data.json", b"{}");
    let service = service(
        MockEmbedder::new(),
        Arc::new(InMemoryDocumentStore::connected()),
    );

    let err = service
        .load_path(&dir.path().join("data.json"), &Metadata::new())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        IngestionError::FileLoading {
            source: FileLoaderError::UnsupportedFileType(_),
            ..
        }
    ));
}

#[tokio::test]
async fn given_single_blank_file_when_loading_then_reports_empty_content() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "blank.txt", b"\n\n   ");
    let service = service(
        MockEmbedder::new(),
        Arc::new(InMemoryDocumentStore::connected()),
    );

    let err = service
        .load_path(&dir.path().join("blank.txt"), &Metadata::new())
        .await
        .unwrap_err();

    assert!(matches!(err, IngestionError::EmptyContent));
    assert!(err.is_validation());
}

#[tokio::test]
async fn given_missing_path_when_loading_then_reports_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let service = service(
        MockEmbedder::new(),
        Arc::new(InMemoryDocumentStore::connected()),
    );

    let err = service
        .load_path(&dir.path().join("nope.txt"), &Metadata::new())
        .await
        .unwrap_err();

    assert!(matches!(err, IngestionError::Io { .. }));
}

#[tokio::test]
async fn given_embedding_failure_on_third_chunk_when_processing_then_earlier_chunks_remain() {
    let store = Arc::new(InMemoryDocumentStore::connected());
    let service = service(MockEmbedder::failing_on("boom"), Arc::clone(&store));

    let err = service
        .process_document("First.\n\nSecond.\n\nboom here.\n\nFourth.", &Metadata::new())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        IngestionError::Embedding { chunk_index: 2, .. }
    ));
    assert_eq!(store.len().await, 2);
}

#[tokio::test]
async fn given_content_when_processing_then_returns_chunk_count_with_positions() {
    let store = Arc::new(InMemoryDocumentStore::connected());
    let service = service(MockEmbedder::new(), Arc::clone(&store));

    let stored = service
        .process_document("One.\n\nTwo.\n\nThree.", &base_metadata())
        .await
        .unwrap();

    assert_eq!(stored, 3);
    let documents = store.list_documents(10, 0).await.unwrap();
    for document in documents {
        let index = document.metadata[CHUNK_INDEX_KEY].as_u64().unwrap();
        assert!(index < 3);
        assert_eq!(document.metadata[CHUNK_COUNT_KEY], json!(3));
    }
}

#[tokio::test]
async fn given_blank_content_when_processing_then_returns_validation_error() {
    let service = service(
        MockEmbedder::new(),
        Arc::new(InMemoryDocumentStore::connected()),
    );

    let err = service
        .process_document("  \n ", &Metadata::new())
        .await
        .unwrap_err();

    assert!(err.is_validation());
}

#[tokio::test]
async fn given_disconnected_store_when_processing_then_reports_storage_error_for_first_chunk() {
    let service = service(MockEmbedder::new(), Arc::new(InMemoryDocumentStore::new()));

    let err = service
        .process_document("Some text.", &Metadata::new())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        IngestionError::Storage { chunk_index: 0, .. }
    ));
}

#[tokio::test]
async fn given_cancelled_token_when_loading_directory_then_stops_before_any_file() {
    let dir = sample_tree();
    let store = Arc::new(InMemoryDocumentStore::connected());
    let embedder = Arc::new(MockEmbedder::new());
    let token = CancellationToken::new();
    token.cancel();
    let service = IngestionService::new(
        Arc::new(PlainTextAdapter),
        Arc::clone(&embedder) as Arc<dyn Embedder>,
        Arc::clone(&store) as Arc<dyn DocumentStore>,
        TextSplitterFactory::create(&ChunkingOptions::default()),
    )
    .with_cancellation(token);

    let err = service
        .load_path(dir.path(), &Metadata::new())
        .await
        .unwrap_err();

    assert!(matches!(err, IngestionError::Cancelled));
    assert_eq!(embedder.calls(), 0);
    assert!(store.is_empty().await);
}

struct CancellingEmbedder {
    inner: MockEmbedder,
    cancel_on_call: usize,
    token: CancellationToken,
}

#[async_trait::async_trait]
impl Embedder for CancellingEmbedder {
    async fn embed(&self, text: &str) -> Result<Embedding, EmbedderError> {
        let embedding = self.inner.embed(text).await?;
        if self.inner.calls() == self.cancel_on_call {
            self.token.cancel();
        }
        Ok(embedding)
    }
}

#[tokio::test]
async fn given_cancellation_during_chunk_when_processing_then_keeps_stored_chunks_and_stops() {
    let store = Arc::new(InMemoryDocumentStore::connected());
    let token = CancellationToken::new();
    let embedder = Arc::new(CancellingEmbedder {
        inner: MockEmbedder::new(),
        cancel_on_call: 2,
        token: token.clone(),
    });
    let service = IngestionService::new(
        Arc::new(PlainTextAdapter),
        Arc::clone(&embedder) as Arc<dyn Embedder>,
        Arc::clone(&store) as Arc<dyn DocumentStore>,
        TextSplitterFactory::create(&ChunkingOptions::new(ChunkingStrategy::FixedSize, 2, 0)),
    )
    .with_cancellation(token);

    let err = service
        .process_document("aabbccddee", &Metadata::new())
        .await
        .unwrap_err();

    assert!(matches!(err, IngestionError::Cancelled));
    assert_eq!(store.len().await, 2);
    assert_eq!(embedder.inner.calls(), 2);
}
