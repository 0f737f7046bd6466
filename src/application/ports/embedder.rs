use async_trait::async_trait;

use crate::domain::Embedding;

#[async_trait]
pub trait Embedder: Send + Sync {
    async fn embed(&self, text: &str) -> Result<Embedding, EmbedderError>;

    /// Embeds each text in order, one request at a time. The first failure aborts the batch.
    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Embedding>, EmbedderError> {
        if texts.is_empty() {
            return Err(EmbedderError::EmptyInput);
        }

        let mut embeddings = Vec::with_capacity(texts.len());
        for text in texts {
            embeddings.push(self.embed(text).await?);
        }
        Ok(embeddings)
    }

    fn cosine_similarity(&self, a: &Embedding, b: &Embedding) -> f32 {
        a.cosine_similarity(b)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum EmbedderError {
    #[error("text to embed cannot be empty")]
    EmptyInput,
    #[error("embedding api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("embedding rate limited")]
    RateLimited,
    #[error("invalid embedding response: {0}")]
    InvalidResponse(String),
}
