use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::application::ports::{
    DocumentStore, DocumentStoreError, Embedder, EmbedderError, LlmClient, LlmClientError,
    SearchResult,
};
use crate::domain::{Document, DocumentId, Metadata};

pub const DEFAULT_SEARCH_LIMIT: usize = 5;
pub const DEFAULT_LIST_LIMIT: usize = 10;
const SEARCH_THRESHOLD: f32 = 0.0;

/// Single-document ingestion, similarity search and prompt augmentation on top of
/// the embedding, storage and generation ports.
pub struct RagService {
    embedder: Arc<dyn Embedder>,
    store: Arc<dyn DocumentStore>,
    llm_client: Arc<dyn LlmClient>,
}

impl RagService {
    pub fn new(
        embedder: Arc<dyn Embedder>,
        store: Arc<dyn DocumentStore>,
        llm_client: Arc<dyn LlmClient>,
    ) -> Self {
        Self {
            embedder,
            store,
            llm_client,
        }
    }

    #[instrument(skip(self, content, metadata), fields(content_len = content.len()))]
    pub async fn add_document(
        &self,
        content: &str,
        metadata: Metadata,
    ) -> Result<DocumentId, RagError> {
        if content.trim().is_empty() {
            return Err(RagError::EmptyContent);
        }

        let embedding = self.embedder.embed(content).await?;
        let document = Document::new(content, metadata);
        self.store
            .store_document_with_embedding(&document, &embedding)
            .await?;

        info!(document_id = %document.id, "Document stored");
        Ok(document.id)
    }

    /// A non-positive `limit` is replaced by [`DEFAULT_SEARCH_LIMIT`].
    #[instrument(skip(self, query), fields(query_len = query.len()))]
    pub async fn search_similar(
        &self,
        query: &str,
        limit: i64,
    ) -> Result<Vec<SearchResult>, RagError> {
        if query.trim().is_empty() {
            return Err(RagError::EmptyQuery);
        }

        let limit = positive_or(limit, DEFAULT_SEARCH_LIMIT);
        let query_embedding = self.embedder.embed(query).await?;
        let results = self
            .store
            .find_similar(&query_embedding, limit, SEARCH_THRESHOLD)
            .await?;

        debug!(limit, results = results.len(), "Similarity search complete");
        Ok(results)
    }

    #[instrument(skip(self, query), fields(query_len = query.len()))]
    pub async fn query(&self, query: &str, limit: i64) -> Result<RagResponse, RagError> {
        let results = self.search_similar(query, limit).await?;
        let documents: Vec<Document> = results.into_iter().map(|r| r.document).collect();

        let prompt = build_augmented_prompt(query, &documents);
        let answer = self.llm_client.generate(&prompt).await?;

        info!(
            documents = documents.len(),
            answer_len = answer.len(),
            "Query answered"
        );
        Ok(RagResponse { answer, documents })
    }

    pub async fn get_document(&self, id: DocumentId) -> Result<Document, RagError> {
        Ok(self.store.get_document(id).await?)
    }

    /// `limit <= 0` lists [`DEFAULT_LIST_LIMIT`] documents; a negative offset starts at zero.
    pub async fn list_documents(&self, limit: i64, offset: i64) -> Result<Vec<Document>, RagError> {
        let limit = positive_or(limit, DEFAULT_LIST_LIMIT);
        let offset = usize::try_from(offset).unwrap_or(0);
        Ok(self.store.list_documents(limit, offset).await?)
    }

    #[instrument(skip(self), fields(document_id = %id))]
    pub async fn delete_document(&self, id: DocumentId) -> Result<(), RagError> {
        self.store.delete_document(id).await?;
        info!("Document deleted");
        Ok(())
    }
}

fn positive_or(value: i64, default: usize) -> usize {
    match usize::try_from(value) {
        Ok(v) if v > 0 => v,
        _ => default,
    }
}

/// Frames retrieved documents as numbered context ahead of `query`. With no documents
/// the prompt is the query alone.
pub fn build_augmented_prompt(query: &str, documents: &[Document]) -> String {
    if documents.is_empty() {
        return query.to_string();
    }

    let mut prompt = String::from("Context information is below.\n---------------------\n");
    for (i, document) in documents.iter().enumerate() {
        prompt.push_str(&format!("Document {}:\n{}\n\n", i + 1, document.content));
    }
    prompt.push_str("---------------------\n");
    prompt.push_str(
        "Given the context information and not prior knowledge, answer the following query:\n",
    );
    prompt.push_str(query);
    prompt
}

#[derive(Debug, Clone, Serialize)]
pub struct RagResponse {
    pub answer: String,
    pub documents: Vec<Document>,
}

#[derive(Debug, thiserror::Error)]
pub enum RagError {
    #[error("content cannot be empty")]
    EmptyContent,
    #[error("query cannot be empty")]
    EmptyQuery,
    #[error("embedding: {0}")]
    Embedding(#[from] EmbedderError),
    #[error("storage: {0}")]
    Storage(#[from] DocumentStoreError),
    #[error("generation: {0}")]
    Generation(#[from] LlmClientError),
}

impl RagError {
    pub fn is_validation(&self) -> bool {
        matches!(self, RagError::EmptyContent | RagError::EmptyQuery)
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, RagError::Storage(DocumentStoreError::NotFound(_)))
    }
}
