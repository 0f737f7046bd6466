use async_trait::async_trait;

use super::{DocumentStoreError, SearchResult};
use crate::domain::{Document, DocumentId, Embedding};

/// Persistence for documents and their embeddings. Every method other than `connect`
/// fails with [`DocumentStoreError::NotConnected`] until `connect` has succeeded.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn connect(&self) -> Result<(), DocumentStoreError>;

    async fn close(&self) -> Result<(), DocumentStoreError>;

    /// Persists the document and its embedding as one atomic unit.
    async fn store_document_with_embedding(
        &self,
        document: &Document,
        embedding: &Embedding,
    ) -> Result<(), DocumentStoreError>;

    /// Nearest documents to `embedding`, highest similarity first.
    async fn find_similar(
        &self,
        embedding: &Embedding,
        limit: usize,
        threshold: f32,
    ) -> Result<Vec<SearchResult>, DocumentStoreError>;

    async fn get_document(&self, id: DocumentId) -> Result<Document, DocumentStoreError>;

    /// Newest first.
    async fn list_documents(
        &self,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<Document>, DocumentStoreError>;

    /// Removes the document together with its embedding.
    async fn delete_document(&self, id: DocumentId) -> Result<(), DocumentStoreError>;
}
