use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use super::{Collection, RecordStore, StoreError};

/// In-process store for tests. Keeps insertion order per collection and rejects
/// duplicate ids the way the unique index does.
#[derive(Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<Collection, Vec<(String, Value)>>>,
    fail_writes: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose inserts always fail, for exercising error paths.
    pub fn failing_writes() -> Self {
        Self {
            fail_writes: true,
            ..Self::default()
        }
    }

    pub async fn len(&self, collection: Collection) -> usize {
        self.collections
            .read()
            .await
            .get(&collection)
            .map_or(0, Vec::len)
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn insert(
        &self,
        collection: Collection,
        id: &str,
        document: Value,
    ) -> Result<(), StoreError> {
        if self.fail_writes {
            return Err(StoreError::Database(sqlx::Error::PoolTimedOut));
        }
        let mut collections = self.collections.write().await;
        let documents = collections.entry(collection).or_default();
        if documents.iter().any(|(existing, _)| existing == id) {
            return Err(StoreError::Duplicate {
                collection,
                id: id.to_string(),
            });
        }
        documents.push((id.to_string(), document));
        Ok(())
    }

    async fn list(&self, collection: Collection, limit: i64) -> Result<Vec<Value>, StoreError> {
        let collections = self.collections.read().await;
        let limit = usize::try_from(limit).unwrap_or(0);
        Ok(collections
            .get(&collection)
            .map(|docs| docs.iter().take(limit).map(|(_, d)| d.clone()).collect())
            .unwrap_or_default())
    }

    async fn get_by_id(
        &self,
        collection: Collection,
        id: &str,
    ) -> Result<Option<Value>, StoreError> {
        let collections = self.collections.read().await;
        Ok(collections.get(&collection).and_then(|docs| {
            docs.iter()
                .find(|(existing, _)| existing == id)
                .map(|(_, d)| d.clone())
        }))
    }
}
