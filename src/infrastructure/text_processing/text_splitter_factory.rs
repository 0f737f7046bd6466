use std::sync::Arc;

use crate::application::ports::TextSplitter;
use crate::domain::{ChunkingOptions, ChunkingStrategy};

use super::{FixedSizeSplitter, ParagraphSplitter, SentenceSplitter};

pub struct TextSplitterFactory;

impl TextSplitterFactory {
    pub fn create(options: &ChunkingOptions) -> Arc<dyn TextSplitter> {
        let ChunkingOptions {
            strategy,
            max_chunk_size,
            chunk_overlap,
        } = *options;

        match strategy {
            ChunkingStrategy::Paragraph => {
                Arc::new(ParagraphSplitter::new(max_chunk_size, chunk_overlap))
            }
            ChunkingStrategy::Sentence => {
                Arc::new(SentenceSplitter::new(max_chunk_size, chunk_overlap))
            }
            ChunkingStrategy::FixedSize => {
                Arc::new(FixedSizeSplitter::new(max_chunk_size, chunk_overlap))
            }
        }
    }
}

/// Splits `text` with the strategy, size and overlap named in `options`.
pub fn chunk_text(text: &str, options: &ChunkingOptions) -> Vec<String> {
    TextSplitterFactory::create(options).split(text)
}
