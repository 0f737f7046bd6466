use async_trait::async_trait;
use chrono::Utc;
use pgvector::Vector;
use sqlx::postgres::PgRow;
use sqlx::types::Json;
use sqlx::{PgPool, Row};
use tokio::sync::RwLock;
use tracing::{info, instrument};
use uuid::Uuid;

use super::create_pool;
use crate::application::ports::{DocumentStore, DocumentStoreError, SearchResult};
use crate::domain::{Document, DocumentId, Embedding, Metadata};

/// Documents and embeddings in PostgreSQL with the pgvector extension.
pub struct PgDocumentStore {
    url: String,
    max_connections: u32,
    dimensions: usize,
    pool: RwLock<Option<PgPool>>,
}

impl PgDocumentStore {
    pub fn new(url: String, max_connections: u32, dimensions: usize) -> Self {
        Self {
            url,
            max_connections,
            dimensions,
            pool: RwLock::new(None),
        }
    }

    async fn pool(&self) -> Result<PgPool, DocumentStoreError> {
        self.pool
            .read()
            .await
            .clone()
            .ok_or(DocumentStoreError::NotConnected)
    }

    fn check_dimensions(&self, embedding: &Embedding) -> Result<(), DocumentStoreError> {
        if embedding.dimensions() != self.dimensions {
            return Err(DocumentStoreError::DimensionMismatch {
                expected: self.dimensions,
                actual: embedding.dimensions(),
            });
        }
        Ok(())
    }
}

fn document_from_row(row: &PgRow) -> Result<Document, sqlx::Error> {
    let metadata: Option<Json<Metadata>> = row.try_get("metadata")?;

    Ok(Document {
        id: DocumentId::from_uuid(row.try_get("id")?),
        content: row.try_get("content")?,
        metadata: metadata.map(|m| m.0).unwrap_or_default(),
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    #[instrument(skip(self))]
    async fn connect(&self) -> Result<(), DocumentStoreError> {
        let pool = create_pool(&self.url, self.max_connections).await?;

        sqlx::migrate!()
            .run(&pool)
            .await
            .map_err(|e| DocumentStoreError::MigrationFailed(e.to_string()))?;

        *self.pool.write().await = Some(pool);
        info!("Successfully connected to the database");
        Ok(())
    }

    async fn close(&self) -> Result<(), DocumentStoreError> {
        if let Some(pool) = self.pool.write().await.take() {
            pool.close().await;
        }
        Ok(())
    }

    #[instrument(skip(self, document, embedding), fields(document_id = %document.id))]
    async fn store_document_with_embedding(
        &self,
        document: &Document,
        embedding: &Embedding,
    ) -> Result<(), DocumentStoreError> {
        let pool = self.pool().await?;
        self.check_dimensions(embedding)?;

        let mut tx = pool
            .begin()
            .await
            .map_err(|e| DocumentStoreError::InsertFailed(e.to_string()))?;

        sqlx::query(
            r#"
            INSERT INTO rag.documents (id, content, metadata, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(document.id.as_uuid())
        .bind(&document.content)
        .bind(Json(&document.metadata))
        .bind(document.created_at)
        .bind(document.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| DocumentStoreError::InsertFailed(e.to_string()))?;

        let now = Utc::now();
        sqlx::query(
            r#"
            INSERT INTO rag.embeddings (id, document_id, embedding, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(document.id.as_uuid())
        .bind(Vector::from(embedding.values.clone()))
        .bind(now)
        .bind(now)
        .execute(&mut *tx)
        .await
        .map_err(|e| DocumentStoreError::InsertFailed(e.to_string()))?;

        tx.commit()
            .await
            .map_err(|e| DocumentStoreError::InsertFailed(e.to_string()))?;

        Ok(())
    }

    #[instrument(skip(self, embedding))]
    async fn find_similar(
        &self,
        embedding: &Embedding,
        limit: usize,
        threshold: f32,
    ) -> Result<Vec<SearchResult>, DocumentStoreError> {
        let pool = self.pool().await?;
        self.check_dimensions(embedding)?;

        let rows = sqlx::query(
            r#"
            SELECT d.id, d.content, d.metadata, d.created_at, d.updated_at,
                   (1 - (e.embedding <=> $1))::real AS similarity
            FROM rag.documents d
            JOIN rag.embeddings e ON e.document_id = d.id
            WHERE $2 <= 0 OR 1 - (e.embedding <=> $1) >= $2
            ORDER BY e.embedding <=> $1
            LIMIT $3
            "#,
        )
        .bind(Vector::from(embedding.values.clone()))
        .bind(f64::from(threshold))
        .bind(limit as i64)
        .fetch_all(&pool)
        .await
        .map_err(|e| DocumentStoreError::SearchFailed(e.to_string()))?;

        rows.iter()
            .map(|row| {
                Ok(SearchResult {
                    document: document_from_row(row)?,
                    similarity: row.try_get("similarity")?,
                })
            })
            .collect::<Result<Vec<_>, sqlx::Error>>()
            .map_err(|e| DocumentStoreError::SearchFailed(e.to_string()))
    }

    #[instrument(skip(self), fields(document_id = %id))]
    async fn get_document(&self, id: DocumentId) -> Result<Document, DocumentStoreError> {
        let pool = self.pool().await?;

        let row = sqlx::query(
            r#"
            SELECT id, content, metadata, created_at, updated_at
            FROM rag.documents
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&pool)
        .await
        .map_err(|e| DocumentStoreError::QueryFailed(e.to_string()))?;

        match row {
            Some(r) => {
                document_from_row(&r).map_err(|e| DocumentStoreError::QueryFailed(e.to_string()))
            }
            None => Err(DocumentStoreError::NotFound(id)),
        }
    }

    #[instrument(skip(self))]
    async fn list_documents(
        &self,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<Document>, DocumentStoreError> {
        let pool = self.pool().await?;

        let rows = sqlx::query(
            r#"
            SELECT id, content, metadata, created_at, updated_at
            FROM rag.documents
            ORDER BY created_at DESC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit as i64)
        .bind(offset as i64)
        .fetch_all(&pool)
        .await
        .map_err(|e| DocumentStoreError::QueryFailed(e.to_string()))?;

        rows.iter()
            .map(document_from_row)
            .collect::<Result<Vec<_>, sqlx::Error>>()
            .map_err(|e| DocumentStoreError::QueryFailed(e.to_string()))
    }

    #[instrument(skip(self), fields(document_id = %id))]
    async fn delete_document(&self, id: DocumentId) -> Result<(), DocumentStoreError> {
        let pool = self.pool().await?;

        // rag.embeddings rows follow via ON DELETE CASCADE.
        let result = sqlx::query("DELETE FROM rag.documents WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&pool)
            .await
            .map_err(|e| DocumentStoreError::DeleteFailed(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(DocumentStoreError::NotFound(id));
        }

        Ok(())
    }
}
