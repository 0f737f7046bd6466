use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::application::ports::{DocumentStore, DocumentStoreError, SearchResult};
use crate::domain::{Document, DocumentId, Embedding};

struct StoredDocument {
    document: Document,
    embedding: Embedding,
}

/// Process-local [`DocumentStore`] ranking by cosine similarity. Used by tests and
/// for running the service without a database.
#[derive(Default)]
pub struct InMemoryDocumentStore {
    connected: AtomicBool,
    entries: RwLock<Vec<StoredDocument>>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that is already connected.
    pub fn connected() -> Self {
        let store = Self::new();
        store.connected.store(true, Ordering::SeqCst);
        store
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    fn ensure_connected(&self) -> Result<(), DocumentStoreError> {
        if self.connected.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(DocumentStoreError::NotConnected)
        }
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn connect(&self) -> Result<(), DocumentStoreError> {
        self.connected.store(true, Ordering::SeqCst);
        Ok(())
    }

    async fn close(&self) -> Result<(), DocumentStoreError> {
        self.connected.store(false, Ordering::SeqCst);
        Ok(())
    }

    async fn store_document_with_embedding(
        &self,
        document: &Document,
        embedding: &Embedding,
    ) -> Result<(), DocumentStoreError> {
        self.ensure_connected()?;

        let mut entries = self.entries.write().await;
        if let Some(first) = entries.first() {
            if first.embedding.dimensions() != embedding.dimensions() {
                return Err(DocumentStoreError::DimensionMismatch {
                    expected: first.embedding.dimensions(),
                    actual: embedding.dimensions(),
                });
            }
        }
        if entries.iter().any(|e| e.document.id == document.id) {
            return Err(DocumentStoreError::InsertFailed(format!(
                "duplicate document id {}",
                document.id
            )));
        }

        entries.push(StoredDocument {
            document: document.clone(),
            embedding: embedding.clone(),
        });
        Ok(())
    }

    async fn find_similar(
        &self,
        embedding: &Embedding,
        limit: usize,
        threshold: f32,
    ) -> Result<Vec<SearchResult>, DocumentStoreError> {
        self.ensure_connected()?;

        let entries = self.entries.read().await;
        let mut results: Vec<SearchResult> = entries
            .iter()
            .map(|e| SearchResult {
                document: e.document.clone(),
                similarity: embedding.cosine_similarity(&e.embedding),
            })
            .filter(|r| threshold <= 0.0 || r.similarity >= threshold)
            .collect();

        results.sort_by(|a, b| b.similarity.total_cmp(&a.similarity));
        results.truncate(limit);
        Ok(results)
    }

    async fn get_document(&self, id: DocumentId) -> Result<Document, DocumentStoreError> {
        self.ensure_connected()?;

        self.entries
            .read()
            .await
            .iter()
            .find(|e| e.document.id == id)
            .map(|e| e.document.clone())
            .ok_or(DocumentStoreError::NotFound(id))
    }

    async fn list_documents(
        &self,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<Document>, DocumentStoreError> {
        self.ensure_connected()?;

        // Insertion order stands in for created_at; newest last in the vec.
        Ok(self
            .entries
            .read()
            .await
            .iter()
            .rev()
            .skip(offset)
            .take(limit)
            .map(|e| e.document.clone())
            .collect())
    }

    async fn delete_document(&self, id: DocumentId) -> Result<(), DocumentStoreError> {
        self.ensure_connected()?;

        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|e| e.document.id != id);
        if entries.len() == before {
            return Err(DocumentStoreError::NotFound(id));
        }
        Ok(())
    }
}
