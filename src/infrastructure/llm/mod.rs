mod gemini_client;
mod gemini_content;
mod gemini_embedder;
mod mock_embedder;
mod mock_llm_client;

pub use gemini_client::GeminiClient;
pub use gemini_embedder::GeminiEmbedder;
pub use mock_embedder::{MOCK_EMBEDDING_DIMENSIONS, MockEmbedder};
pub use mock_llm_client::{MOCK_ANSWER, MockLlmClient};

pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";

pub(crate) use gemini_content::GeminiContent;
