use crate::domain::DocumentId;

#[derive(Debug, thiserror::Error)]
pub enum DocumentStoreError {
    #[error("database not connected")]
    NotConnected,
    #[error("document not found: {0}")]
    NotFound(DocumentId),
    #[error("connection failed: {0}")]
    ConnectionFailed(String),
    #[error("migration failed: {0}")]
    MigrationFailed(String),
    #[error("embedding has {actual} dimensions, store expects {expected}")]
    DimensionMismatch { expected: usize, actual: usize },
    #[error("insert failed: {0}")]
    InsertFailed(String),
    #[error("search failed: {0}")]
    SearchFailed(String),
    #[error("query failed: {0}")]
    QueryFailed(String),
    #[error("delete failed: {0}")]
    DeleteFailed(String),
}
