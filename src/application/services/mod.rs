mod ingestion_service;
mod rag_service;

pub use ingestion_service::{IngestionError, IngestionReport, IngestionService};
pub use rag_service::{
    DEFAULT_LIST_LIMIT, DEFAULT_SEARCH_LIMIT, RagError, RagResponse, RagService,
    build_augmented_prompt,
};
