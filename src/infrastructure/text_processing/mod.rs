mod fixed_size_splitter;
mod item_combiner;
mod paragraph_splitter;
mod plain_text_adapter;
mod sentence_splitter;
mod text_splitter_factory;

pub use fixed_size_splitter::FixedSizeSplitter;
pub use paragraph_splitter::ParagraphSplitter;
pub use plain_text_adapter::PlainTextAdapter;
pub use sentence_splitter::SentenceSplitter;
pub use text_splitter_factory::{TextSplitterFactory, chunk_text};
