use std::path::Path;

use async_trait::async_trait;

#[async_trait]
pub trait FileLoader: Send + Sync {
    async fn extract_text(&self, data: &[u8], path: &Path) -> Result<String, FileLoaderError>;
}

#[derive(Debug, thiserror::Error)]
pub enum FileLoaderError {
    #[error("unsupported file type: {0}")]
    UnsupportedFileType(String),
    #[error("extraction failed: {0}")]
    ExtractionFailed(String),
}
