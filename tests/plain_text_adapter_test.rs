use std::path::Path;

use ragserve::application::ports::{FileLoader, FileLoaderError};
use ragserve::infrastructure::text_processing::PlainTextAdapter;

#[tokio::test]
async fn given_valid_utf8_bytes_when_extracting_then_returns_string() {
    let adapter = PlainTextAdapter;

    let result = adapter
        .extract_text(b"Hello, this is plain text.", Path::new("readme.txt"))
        .await;

    assert_eq!(result.unwrap(), "Hello, this is plain text.");
}

#[tokio::test]
async fn given_invalid_utf8_bytes_when_extracting_then_returns_extraction_failed() {
    let adapter = PlainTextAdapter;

    let result = adapter
        .extract_text(&[0xFF, 0xFE, 0xFD], Path::new("broken.txt"))
        .await;

    assert!(matches!(result, Err(FileLoaderError::ExtractionFailed(_))));
}

#[tokio::test]
async fn given_json_file_when_extracting_then_returns_unsupported() {
    let adapter = PlainTextAdapter;

    let result = adapter.extract_text(b"{}", Path::new("data.JSON")).await;

    assert!(matches!(
        result,
        Err(FileLoaderError::UnsupportedFileType(_))
    ));
}

#[tokio::test]
async fn given_unlisted_extension_when_extracting_then_reads_as_text() {
    let adapter = PlainTextAdapter;

    let result = adapter.extract_text(b"key: value", Path::new("config.yaml")).await;

    assert_eq!(result.unwrap(), "key: value");
}
