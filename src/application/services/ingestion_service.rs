use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};
use walkdir::WalkDir;

use crate::application::ports::{
    DocumentStore, DocumentStoreError, Embedder, EmbedderError, FileLoader, FileLoaderError,
    TextSplitter,
};
use crate::domain::{Document, Metadata, chunk_metadata, file_metadata};

const SUPPORTED_EXTENSIONS: [&str; 2] = ["txt", "md"];

/// Outcome of a file or directory load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestionReport {
    pub files_processed: usize,
    pub files_skipped: usize,
    pub chunks_stored: usize,
}

/// Loads text from disk, chunks it and persists every chunk with its embedding.
/// Files and chunks are handled strictly one after another.
pub struct IngestionService {
    file_loader: Arc<dyn FileLoader>,
    embedder: Arc<dyn Embedder>,
    store: Arc<dyn DocumentStore>,
    text_splitter: Arc<dyn TextSplitter>,
    cancellation: CancellationToken,
}

impl IngestionService {
    pub fn new(
        file_loader: Arc<dyn FileLoader>,
        embedder: Arc<dyn Embedder>,
        store: Arc<dyn DocumentStore>,
        text_splitter: Arc<dyn TextSplitter>,
    ) -> Self {
        Self {
            file_loader,
            embedder,
            store,
            text_splitter,
            cancellation: CancellationToken::new(),
        }
    }

    /// Stops new files and chunks from starting once `token` is cancelled.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = token;
        self
    }

    /// Ingests a single file or, recursively, every `.txt`/`.md` file under a directory.
    ///
    /// Single files propagate their error. Inside a directory a failing file is logged
    /// and counted as skipped; only cancellation ends the walk early.
    #[instrument(skip(self, base), fields(path = %path.display()))]
    pub async fn load_path(
        &self,
        path: &Path,
        base: &Metadata,
    ) -> Result<IngestionReport, IngestionError> {
        let meta = tokio::fs::metadata(path)
            .await
            .map_err(|source| IngestionError::Io {
                path: path.to_path_buf(),
                source,
            })?;

        if meta.is_dir() {
            return self.load_directory(path, base).await;
        }

        let chunks_stored = self.load_file(path, base).await?;
        Ok(IngestionReport {
            files_processed: 1,
            files_skipped: 0,
            chunks_stored,
        })
    }

    async fn load_directory(
        &self,
        dir: &Path,
        base: &Metadata,
    ) -> Result<IngestionReport, IngestionError> {
        let mut report = IngestionReport::default();

        for path in discover_text_files(dir) {
            self.ensure_not_cancelled()?;

            match self.load_file(&path, base).await {
                Ok(chunks) => {
                    report.files_processed += 1;
                    report.chunks_stored += chunks;
                }
                Err(IngestionError::Cancelled) => return Err(IngestionError::Cancelled),
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Skipping file");
                    report.files_skipped += 1;
                }
            }
        }

        info!(
            files_processed = report.files_processed,
            files_skipped = report.files_skipped,
            chunks_stored = report.chunks_stored,
            "Directory ingestion complete"
        );
        Ok(report)
    }

    #[instrument(skip(self, base), fields(file = %path.display()))]
    async fn load_file(&self, path: &Path, base: &Metadata) -> Result<usize, IngestionError> {
        self.ensure_not_cancelled()?;

        let data = tokio::fs::read(path)
            .await
            .map_err(|source| IngestionError::Io {
                path: path.to_path_buf(),
                source,
            })?;

        let text = self
            .file_loader
            .extract_text(&data, path)
            .await
            .map_err(|source| IngestionError::FileLoading {
                path: path.to_path_buf(),
                source,
            })?;

        let metadata = file_metadata(path, base);
        let chunks = self.process_document(&text, &metadata).await?;
        info!(chunks, "File ingested");
        Ok(chunks)
    }

    /// Chunks `content` and stores each chunk as its own document. Returns the number
    /// of chunks stored. A failing chunk aborts the rest; earlier chunks stay stored.
    #[instrument(skip(self, content, base), fields(content_len = content.len()))]
    pub async fn process_document(
        &self,
        content: &str,
        base: &Metadata,
    ) -> Result<usize, IngestionError> {
        if content.trim().is_empty() {
            return Err(IngestionError::EmptyContent);
        }

        let chunks = self.text_splitter.split(content);
        let total = chunks.len();

        for (chunk_index, chunk) in chunks.into_iter().enumerate() {
            self.ensure_not_cancelled()?;

            let embedding = self
                .embedder
                .embed(&chunk)
                .await
                .map_err(|source| IngestionError::Embedding {
                    chunk_index,
                    source,
                })?;

            let document = Document::new(chunk, chunk_metadata(chunk_index, total, base));
            self.store
                .store_document_with_embedding(&document, &embedding)
                .await
                .map_err(|source| IngestionError::Storage {
                    chunk_index,
                    source,
                })?;

            debug!(chunk_index, total, document_id = %document.id, "Chunk stored");
        }

        Ok(total)
    }

    fn ensure_not_cancelled(&self) -> Result<(), IngestionError> {
        if self.cancellation.is_cancelled() {
            return Err(IngestionError::Cancelled);
        }
        Ok(())
    }
}

fn is_supported_text_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            SUPPORTED_EXTENSIONS
                .iter()
                .any(|supported| ext.eq_ignore_ascii_case(supported))
        })
}

fn discover_text_files(dir: &Path) -> Vec<PathBuf> {
    WalkDir::new(dir)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!(error = %e, "Failed to read directory entry");
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| is_supported_text_file(path))
        .collect()
}

#[derive(Debug, thiserror::Error)]
pub enum IngestionError {
    #[error("document content cannot be empty")]
    EmptyContent,
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to load {}: {source}", .path.display())]
    FileLoading {
        path: PathBuf,
        #[source]
        source: FileLoaderError,
    },
    #[error("failed to embed chunk {chunk_index}: {source}")]
    Embedding {
        chunk_index: usize,
        #[source]
        source: EmbedderError,
    },
    #[error("failed to store chunk {chunk_index}: {source}")]
    Storage {
        chunk_index: usize,
        #[source]
        source: DocumentStoreError,
    },
    #[error("ingestion cancelled")]
    Cancelled,
}

impl IngestionError {
    pub fn is_validation(&self) -> bool {
        matches!(self, IngestionError::EmptyContent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_mixed_case_extensions_when_filtering_then_accepts_txt_and_md_only() {
        assert!(is_supported_text_file(Path::new("notes/README.MD")));
        assert!(is_supported_text_file(Path::new("a.txt")));
        assert!(!is_supported_text_file(Path::new("data.json")));
        assert!(!is_supported_text_file(Path::new("Makefile")));
    }
}
