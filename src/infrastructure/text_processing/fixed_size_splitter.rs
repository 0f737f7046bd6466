use crate::application::ports::TextSplitter;

pub struct FixedSizeSplitter {
    chunk_size: usize,
    chunk_overlap: usize,
}

impl FixedSizeSplitter {
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Self {
        Self {
            chunk_size,
            chunk_overlap,
        }
    }
}

impl TextSplitter for FixedSizeSplitter {
    fn split(&self, text: &str) -> Vec<String> {
        split_fixed_size(text, self.chunk_size, self.chunk_overlap)
    }
}

/// Sliding character window over the trimmed text. A final window shorter than a quarter
/// of `chunk_size` is appended to the previous chunk instead of standing alone.
pub(crate) fn split_fixed_size(text: &str, chunk_size: usize, chunk_overlap: usize) -> Vec<String> {
    let text = text.trim();
    if text.is_empty() {
        return Vec::new();
    }

    let chunk_size = chunk_size.max(1);
    let chars: Vec<char> = text.chars().collect();
    let total_len = chars.len();

    if total_len <= chunk_size {
        return vec![text.to_string()];
    }

    let step = if chunk_size > chunk_overlap {
        chunk_size - chunk_overlap
    } else {
        chunk_size
    };

    let mut chunks: Vec<String> = Vec::new();
    let mut offset = 0;

    while offset < total_len {
        let end = (offset + chunk_size).min(total_len);
        let window: String = chars[offset..end].iter().collect();

        if end - offset < chunk_size / 4 {
            if let Some(previous) = chunks.last_mut() {
                previous.push(' ');
                previous.push_str(&window);
                break;
            }
        }

        if !window.trim().is_empty() {
            chunks.push(window);
        }

        if end == total_len {
            break;
        }

        offset += step;
    }

    chunks
}
