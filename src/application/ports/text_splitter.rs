/// A chunking strategy. Implementations are pure: same input, same chunks, never an error.
pub trait TextSplitter: Send + Sync {
    fn split(&self, text: &str) -> Vec<String>;
}
