use serde::Serialize;

use crate::domain::Document;

#[derive(Debug, Clone, Serialize)]
pub struct SearchResult {
    pub document: Document,
    pub similarity: f32,
}
