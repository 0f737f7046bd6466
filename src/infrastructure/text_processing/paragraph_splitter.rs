use crate::application::ports::TextSplitter;

use super::item_combiner::{char_len, combine_into_chunks};

const PARAGRAPH_SEPARATOR: &str = "\n\n";

pub struct ParagraphSplitter {
    max_chunk_size: usize,
    chunk_overlap: usize,
}

impl ParagraphSplitter {
    pub fn new(max_chunk_size: usize, chunk_overlap: usize) -> Self {
        Self {
            max_chunk_size,
            chunk_overlap,
        }
    }
}

impl TextSplitter for ParagraphSplitter {
    fn split(&self, text: &str) -> Vec<String> {
        let paragraphs: Vec<String> = text
            .split(PARAGRAPH_SEPARATOR)
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(String::from)
            .collect();

        if paragraphs.is_empty() {
            return paragraphs;
        }

        // Documents made only of small paragraphs keep one chunk per paragraph.
        if paragraphs
            .iter()
            .all(|p| char_len(p) <= self.max_chunk_size)
        {
            return paragraphs;
        }

        combine_into_chunks(&paragraphs, self.max_chunk_size, self.chunk_overlap)
    }
}
