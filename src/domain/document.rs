use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{DocumentId, Metadata};

/// A stored unit of text. Every chunk produced during ingestion becomes its own `Document`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: DocumentId,
    pub content: String,
    #[serde(default, skip_serializing_if = "Metadata::is_empty")]
    pub metadata: Metadata,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Document {
    pub fn new(content: impl Into<String>, metadata: Metadata) -> Self {
        let now = Utc::now();
        Self {
            id: DocumentId::new(),
            content: content.into(),
            metadata,
            created_at: now,
            updated_at: now,
        }
    }
}
