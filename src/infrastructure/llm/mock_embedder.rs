use std::sync::atomic::{AtomicUsize, Ordering};

use crate::application::ports::{Embedder, EmbedderError};
use crate::domain::Embedding;

pub const MOCK_EMBEDDING_DIMENSIONS: usize = 384;

/// Deterministic bag-of-characters embedding. Texts sharing characters land close together,
/// which is enough to make similarity ranking observable in tests.
pub struct MockEmbedder {
    dimensions: usize,
    fail_on: Option<String>,
    calls: AtomicUsize,
}

impl MockEmbedder {
    pub fn new() -> Self {
        Self::with_dimensions(MOCK_EMBEDDING_DIMENSIONS)
    }

    pub fn with_dimensions(dimensions: usize) -> Self {
        Self {
            dimensions: dimensions.max(1),
            fail_on: None,
            calls: AtomicUsize::new(0),
        }
    }

    /// Fails every request whose text contains `needle`.
    pub fn failing_on(needle: impl Into<String>) -> Self {
        Self {
            fail_on: Some(needle.into()),
            ..Self::new()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Default for MockEmbedder {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl Embedder for MockEmbedder {
    async fn embed(&self, text: &str) -> Result<Embedding, EmbedderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if text.is_empty() {
            return Err(EmbedderError::EmptyInput);
        }
        if let Some(needle) = &self.fail_on {
            if text.contains(needle.as_str()) {
                return Err(EmbedderError::ApiRequestFailed(format!(
                    "mock failure on '{}'",
                    needle
                )));
            }
        }

        let mut values = vec![0.0_f32; self.dimensions];
        for c in text.trim().to_lowercase().chars() {
            values[c as usize % self.dimensions] += 1.0;
        }
        Ok(Embedding::new(values))
    }
}
