use std::fmt;

use serde::{Deserialize, Serialize};

pub const DEFAULT_MAX_CHUNK_SIZE: usize = 1000;
pub const DEFAULT_CHUNK_OVERLAP: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ChunkingStrategy {
    #[default]
    Paragraph,
    Sentence,
    FixedSize,
}

impl ChunkingStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChunkingStrategy::Paragraph => "paragraph",
            ChunkingStrategy::Sentence => "sentence",
            ChunkingStrategy::FixedSize => "fixed_size",
        }
    }

    /// Strict parse, used where an unknown name should be reported instead of defaulted.
    pub fn parse_strict(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "paragraph" => Some(Self::Paragraph),
            "sentence" => Some(Self::Sentence),
            "fixed_size" | "fixed-size" | "fixed" => Some(Self::FixedSize),
            _ => None,
        }
    }
}

/// Unrecognized names fall back to [`ChunkingStrategy::Paragraph`].
impl From<&str> for ChunkingStrategy {
    fn from(s: &str) -> Self {
        Self::parse_strict(s).unwrap_or_default()
    }
}

impl From<String> for ChunkingStrategy {
    fn from(s: String) -> Self {
        Self::from(s.as_str())
    }
}

impl From<ChunkingStrategy> for String {
    fn from(strategy: ChunkingStrategy) -> Self {
        strategy.as_str().to_string()
    }
}

impl fmt::Display for ChunkingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Sizes are measured in characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkingOptions {
    pub strategy: ChunkingStrategy,
    pub max_chunk_size: usize,
    pub chunk_overlap: usize,
}

impl ChunkingOptions {
    pub fn new(strategy: ChunkingStrategy, max_chunk_size: usize, chunk_overlap: usize) -> Self {
        Self {
            strategy,
            max_chunk_size,
            chunk_overlap,
        }
    }
}

impl Default for ChunkingOptions {
    fn default() -> Self {
        Self {
            strategy: ChunkingStrategy::Paragraph,
            max_chunk_size: DEFAULT_MAX_CHUNK_SIZE,
            chunk_overlap: DEFAULT_CHUNK_OVERLAP,
        }
    }
}
