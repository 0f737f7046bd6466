mod documents;
mod error;
mod health;
mod query;
mod search;

pub use documents::{
    create_document_handler, delete_document_handler, get_document_handler,
    list_documents_handler,
};
pub use error::{ApiError, ErrorResponse};
pub use health::health_handler;
pub use query::query_handler;
pub use search::search_handler;
