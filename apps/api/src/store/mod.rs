//! Record store — durable JSON documents grouped into collections.
//!
//! `RecordStore` is the narrow capability the handlers see. `PgRecordStore` is the production
//! backend; tests use `memory::MemoryStore`. Typed access goes through the `Record` helpers
//! below, which serialize to and from `serde_json::Value`.

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use thiserror::Error;

pub mod postgres;

#[cfg(test)]
pub mod memory;

pub use postgres::PgRecordStore;

/// Default cap on list queries.
pub const DEFAULT_LIST_LIMIT: i64 = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    JobPostings,
    StatusChecks,
}

impl Collection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::JobPostings => "job_postings",
            Collection::StatusChecks => "status_checks",
        }
    }
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    #[error("Failed to encode {collection} record: {source}")]
    Encode {
        collection: Collection,
        source: serde_json::Error,
    },

    #[error("Failed to decode {collection} record: {source}")]
    Decode {
        collection: Collection,
        source: serde_json::Error,
    },

    #[error("{collection} record {id} not found")]
    NotFound { collection: Collection, id: String },

    #[error("{collection} record {id} already exists")]
    Duplicate { collection: Collection, id: String },
}

/// Untyped document storage. Documents come back without any storage-internal id.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn insert(
        &self,
        collection: Collection,
        id: &str,
        document: Value,
    ) -> Result<(), StoreError>;

    /// Up to `limit` documents in the store's natural order.
    async fn list(&self, collection: Collection, limit: i64) -> Result<Vec<Value>, StoreError>;

    async fn get_by_id(
        &self,
        collection: Collection,
        id: &str,
    ) -> Result<Option<Value>, StoreError>;
}

/// A typed document living in one collection.
pub trait Record: Serialize + DeserializeOwned {
    const COLLECTION: Collection;

    fn record_id(&self) -> String;
}

pub async fn insert_record<R: Record>(
    store: &dyn RecordStore,
    record: &R,
) -> Result<(), StoreError> {
    let document = serde_json::to_value(record).map_err(|source| StoreError::Encode {
        collection: R::COLLECTION,
        source,
    })?;
    store
        .insert(R::COLLECTION, &record.record_id(), document)
        .await
}

pub async fn list_records<R: Record>(
    store: &dyn RecordStore,
    limit: i64,
) -> Result<Vec<R>, StoreError> {
    store
        .list(R::COLLECTION, limit)
        .await?
        .into_iter()
        .map(decode::<R>)
        .collect()
}

/// Fetches one record, mapping absence to `StoreError::NotFound`.
pub async fn find_record<R: Record>(store: &dyn RecordStore, id: &str) -> Result<R, StoreError> {
    let document = store
        .get_by_id(R::COLLECTION, id)
        .await?
        .ok_or_else(|| StoreError::NotFound {
            collection: R::COLLECTION,
            id: id.to_string(),
        })?;
    decode(document)
}

fn decode<R: Record>(document: Value) -> Result<R, StoreError> {
    serde_json::from_value(document).map_err(|source| StoreError::Decode {
        collection: R::COLLECTION,
        source,
    })
}
