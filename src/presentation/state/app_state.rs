use std::sync::Arc;

use crate::application::services::RagService;

#[derive(Clone)]
pub struct AppState {
    pub rag_service: Arc<RagService>,
}

impl AppState {
    pub fn new(rag_service: Arc<RagService>) -> Self {
        Self { rag_service }
    }
}
