use std::path::Path;

use async_trait::async_trait;

use crate::application::ports::{FileLoader, FileLoaderError};

pub struct PlainTextAdapter;

#[async_trait]
impl FileLoader for PlainTextAdapter {
    async fn extract_text(&self, data: &[u8], path: &Path) -> Result<String, FileLoaderError> {
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            return Err(FileLoaderError::UnsupportedFileType(
                "JSON file loading is not implemented".to_string(),
            ));
        }

        String::from_utf8(data.to_vec())
            .map_err(|e| FileLoaderError::ExtractionFailed(e.to_string()))
    }
}
