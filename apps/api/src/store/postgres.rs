use async_trait::async_trait;
use serde_json::Value;
use sqlx::migrate::Migrator;
use sqlx::PgPool;
use tracing::info;

use super::{Collection, RecordStore, StoreError};

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// PostgreSQL-backed store. Every collection shares the `documents` table; the `seq`
/// column is the internal id and is never returned.
#[derive(Clone)]
pub struct PgRecordStore {
    pool: PgPool,
}

impl PgRecordStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn run_migrations(&self) -> Result<(), StoreError> {
        MIGRATOR.run(&self.pool).await?;
        info!("Database migrations applied");
        Ok(())
    }

    /// Closes the pool. Pending queries finish first.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl RecordStore for PgRecordStore {
    async fn insert(
        &self,
        collection: Collection,
        id: &str,
        document: Value,
    ) -> Result<(), StoreError> {
        sqlx::query("INSERT INTO documents (collection, record_id, body) VALUES ($1, $2, $3)")
            .bind(collection.as_str())
            .bind(id)
            .bind(&document)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if e.as_database_error()
                    .is_some_and(|db| db.is_unique_violation())
                {
                    StoreError::Duplicate {
                        collection,
                        id: id.to_string(),
                    }
                } else {
                    StoreError::Database(e)
                }
            })?;
        Ok(())
    }

    async fn list(&self, collection: Collection, limit: i64) -> Result<Vec<Value>, StoreError> {
        let documents = sqlx::query_scalar::<_, Value>(
            "SELECT body FROM documents WHERE collection = $1 ORDER BY seq LIMIT $2",
        )
        .bind(collection.as_str())
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(documents)
    }

    async fn get_by_id(
        &self,
        collection: Collection,
        id: &str,
    ) -> Result<Option<Value>, StoreError> {
        let document = sqlx::query_scalar::<_, Value>(
            "SELECT body FROM documents WHERE collection = $1 AND record_id = $2",
        )
        .bind(collection.as_str())
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(document)
    }
}
