use std::path::Path;

use chrono::Utc;
use serde_json::{Map, Value};

/// Open key/value metadata attached to a document. Key order carries no meaning.
pub type Metadata = Map<String, Value>;

pub const CHUNK_INDEX_KEY: &str = "chunk_index";
pub const CHUNK_COUNT_KEY: &str = "chunk_count";

/// Copies `base` and records the chunk's position within its source.
pub fn chunk_metadata(index: usize, total: usize, base: &Metadata) -> Metadata {
    let mut metadata = base.clone();
    metadata.insert(CHUNK_INDEX_KEY.to_string(), Value::from(index));
    metadata.insert(CHUNK_COUNT_KEY.to_string(), Value::from(total));
    metadata
}

/// Copies `base` and records where a file-sourced document came from.
pub fn file_metadata(path: &Path, base: &Metadata) -> Metadata {
    let mut metadata = base.clone();

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let file_ext = path
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();

    metadata.insert("source".to_string(), Value::from("file"));
    metadata.insert(
        "file_path".to_string(),
        Value::from(path.to_string_lossy().into_owned()),
    );
    metadata.insert("file_name".to_string(), Value::from(file_name));
    metadata.insert("file_ext".to_string(), Value::from(file_ext));
    metadata.insert("loaded_at".to_string(), Value::from(Utc::now().to_rfc3339()));
    metadata
}
