mod document_store;
mod document_store_error;
mod embedder;
mod file_loader;
mod llm_client;
mod search_result;
mod text_splitter;

pub use document_store::DocumentStore;
pub use document_store_error::DocumentStoreError;
pub use embedder::{Embedder, EmbedderError};
pub use file_loader::{FileLoader, FileLoaderError};
pub use llm_client::{LlmClient, LlmClientError};
pub use search_result::SearchResult;
pub use text_splitter::TextSplitter;
