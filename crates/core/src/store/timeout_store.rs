//! Bounded-latency wrapper around any [`DocumentStore`].

use async_trait::async_trait;
use log::warn;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use super::store_model::{CollectionPath, Document, DocumentPath, Fields, Query, WriteBatch};
use super::store_traits::DocumentStore;
use crate::errors::{StoreError, StoreResult};

/// Fails any store call that takes longer than `timeout` with
/// [`StoreError::Timeout`].
///
/// A timed-out write may still be applied by the backend later.
pub struct TimeoutDocumentStore {
    inner: Arc<dyn DocumentStore>,
    timeout: Duration,
}

impl TimeoutDocumentStore {
    pub fn new(inner: Arc<dyn DocumentStore>, timeout: Duration) -> Self {
        Self { inner, timeout }
    }

    async fn bounded<T>(
        &self,
        operation: &str,
        target: &str,
        call: impl Future<Output = StoreResult<T>>,
    ) -> StoreResult<T> {
        match tokio::time::timeout(self.timeout, call).await {
            Ok(result) => result,
            Err(_) => {
                warn!(
                    "Store {} on {} timed out after {:?}",
                    operation, target, self.timeout
                );
                Err(StoreError::Timeout(format!("{} {}", operation, target)))
            }
        }
    }
}

#[async_trait]
impl DocumentStore for TimeoutDocumentStore {
    async fn get(&self, path: &DocumentPath) -> StoreResult<Option<Document>> {
        self.bounded("get", path.as_str(), self.inner.get(path)).await
    }

    async fn set(&self, path: &DocumentPath, fields: Fields) -> StoreResult<()> {
        self.bounded("set", path.as_str(), self.inner.set(path, fields))
            .await
    }

    async fn update(&self, path: &DocumentPath, fields: Fields) -> StoreResult<()> {
        self.bounded("update", path.as_str(), self.inner.update(path, fields))
            .await
    }

    async fn delete(&self, path: &DocumentPath) -> StoreResult<()> {
        self.bounded("delete", path.as_str(), self.inner.delete(path))
            .await
    }

    async fn list(&self, collection: &CollectionPath) -> StoreResult<Vec<Document>> {
        self.bounded("list", collection.as_str(), self.inner.list(collection))
            .await
    }

    async fn query(&self, query: &Query) -> StoreResult<Vec<Document>> {
        self.bounded("query", query.collection.as_str(), self.inner.query(query))
            .await
    }

    async fn commit(&self, batch: WriteBatch) -> StoreResult<()> {
        let target = format!("({} writes)", batch.len());
        self.bounded("commit", &target, self.inner.commit(batch))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemoryDocumentStore;

    struct StalledStore;

    #[async_trait]
    impl DocumentStore for StalledStore {
        async fn get(&self, _path: &DocumentPath) -> StoreResult<Option<Document>> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok(None)
        }
        async fn set(&self, _path: &DocumentPath, _fields: Fields) -> StoreResult<()> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok(())
        }
        async fn update(&self, _path: &DocumentPath, _fields: Fields) -> StoreResult<()> {
            Ok(())
        }
        async fn delete(&self, _path: &DocumentPath) -> StoreResult<()> {
            Ok(())
        }
        async fn list(&self, _collection: &CollectionPath) -> StoreResult<Vec<Document>> {
            Ok(Vec::new())
        }
        async fn query(&self, _query: &Query) -> StoreResult<Vec<Document>> {
            Ok(Vec::new())
        }
        async fn commit(&self, _batch: WriteBatch) -> StoreResult<()> {
            Ok(())
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_stalled_call_times_out() {
        let store = TimeoutDocumentStore::new(Arc::new(StalledStore), Duration::from_secs(15));
        let path = CollectionPath::root("tasks").doc("t1");

        let err = store.get(&path).await.unwrap_err();
        assert_eq!(err, StoreError::Timeout("get tasks/t1".to_string()));

        let err = store.set(&path, Fields::new()).await.unwrap_err();
        assert!(matches!(err, StoreError::Timeout(_)));
    }

    #[tokio::test]
    async fn test_fast_calls_pass_through() {
        let inner = Arc::new(InMemoryDocumentStore::new());
        let store = TimeoutDocumentStore::new(inner.clone(), Duration::from_secs(15));
        let path = CollectionPath::root("tasks").doc("t1");

        store.set(&path, Fields::new()).await.unwrap();
        assert!(inner.contains(&path));
        assert!(store.get(&path).await.unwrap().is_some());
    }
}
