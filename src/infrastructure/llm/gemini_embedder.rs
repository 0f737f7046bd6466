use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::application::ports::{Embedder, EmbedderError};
use crate::domain::Embedding;

use super::{DEFAULT_GEMINI_BASE_URL, GeminiContent};

const EMBED_TIMEOUT: Duration = Duration::from_secs(30);

pub struct GeminiEmbedder {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
}

#[derive(Serialize)]
struct EmbedContentRequest<'a> {
    content: GeminiContent<'a>,
}

#[derive(Deserialize)]
struct EmbedContentResponse {
    embedding: EmbeddingValues,
}

#[derive(Deserialize)]
struct EmbeddingValues {
    values: Vec<f32>,
}

impl GeminiEmbedder {
    pub fn new(api_key: String, model: String) -> Result<Self, EmbedderError> {
        Self::with_base_url(api_key, model, DEFAULT_GEMINI_BASE_URL.to_string())
    }

    pub fn with_base_url(
        api_key: String,
        model: String,
        base_url: String,
    ) -> Result<Self, EmbedderError> {
        let client = Client::builder()
            .timeout(EMBED_TIMEOUT)
            .build()
            .map_err(|e| EmbedderError::ApiRequestFailed(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            model,
        })
    }
}

#[async_trait]
impl Embedder for GeminiEmbedder {
    #[instrument(skip(self, text), fields(model = %self.model, text_len = text.len()))]
    async fn embed(&self, text: &str) -> Result<Embedding, EmbedderError> {
        if text.is_empty() {
            return Err(EmbedderError::EmptyInput);
        }

        let request_body = EmbedContentRequest {
            content: GeminiContent::from_text(text.trim()),
        };

        let response = self
            .client
            .post(format!(
                "{}/v1/models/{}:embedContent",
                self.base_url, self.model
            ))
            .query(&[("key", self.api_key.as_str())])
            .json(&request_body)
            .send()
            .await
            .map_err(|e| EmbedderError::ApiRequestFailed(e.to_string()))?;

        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(EmbedderError::RateLimited);
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(EmbedderError::ApiRequestFailed(format!(
                "HTTP {}: {}",
                status, body
            )));
        }

        let embedding_response: EmbedContentResponse = response
            .json()
            .await
            .map_err(|e| EmbedderError::InvalidResponse(e.to_string()))?;

        Ok(Embedding::new(embedding_response.embedding.values))
    }
}
