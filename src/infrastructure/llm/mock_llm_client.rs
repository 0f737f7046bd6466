use tokio::sync::Mutex;

use crate::application::ports::{LlmClient, LlmClientError};

pub const MOCK_ANSWER: &str = "Mock answer";

/// Answers every prompt with [`MOCK_ANSWER`] and keeps the prompts it was sent.
#[derive(Default)]
pub struct MockLlmClient {
    prompts: Mutex<Vec<String>>,
}

impl MockLlmClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn prompts(&self) -> Vec<String> {
        self.prompts.lock().await.clone()
    }
}

#[async_trait::async_trait]
impl LlmClient for MockLlmClient {
    async fn generate(&self, prompt: &str) -> Result<String, LlmClientError> {
        self.prompts.lock().await.push(prompt.to_string());
        Ok(MOCK_ANSWER.to_string())
    }
}
