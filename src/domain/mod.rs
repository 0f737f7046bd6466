mod chunking_options;
mod document;
mod document_id;
mod embedding;
mod metadata;

pub use chunking_options::{
    ChunkingOptions, ChunkingStrategy, DEFAULT_CHUNK_OVERLAP, DEFAULT_MAX_CHUNK_SIZE,
};
pub use document::Document;
pub use document_id::DocumentId;
pub use embedding::Embedding;
pub use metadata::{CHUNK_COUNT_KEY, CHUNK_INDEX_KEY, Metadata, chunk_metadata, file_metadata};
