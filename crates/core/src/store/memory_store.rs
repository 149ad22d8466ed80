//! In-process [`DocumentStore`] used for offline runs and tests.

use async_trait::async_trait;
use log::debug;
use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::store_model::{
    CollectionPath, Document, DocumentPath, Fields, Query, WriteBatch, WriteOp,
};
use super::store_traits::DocumentStore;
use crate::errors::{StoreError, StoreResult};

#[derive(Debug, Clone)]
struct StoredDocument {
    seq: u64,
    fields: Fields,
}

#[derive(Debug, Default)]
struct MemoryState {
    docs: HashMap<DocumentPath, StoredDocument>,
    next_seq: u64,
}

impl MemoryState {
    fn put(&mut self, path: DocumentPath, fields: Fields) {
        match self.docs.get_mut(&path) {
            Some(existing) => existing.fields = fields,
            None => {
                let seq = self.next_seq;
                self.next_seq += 1;
                self.docs.insert(path, StoredDocument { seq, fields });
            }
        }
    }

    fn merge(&mut self, path: &DocumentPath, fields: Fields) -> StoreResult<()> {
        let existing = self
            .docs
            .get_mut(path)
            .ok_or_else(|| StoreError::NotFound(path.to_string()))?;
        existing.fields.extend(fields);
        Ok(())
    }

    fn children(&self, collection: &CollectionPath) -> Vec<Document> {
        let mut matched: Vec<(&DocumentPath, &StoredDocument)> = self
            .docs
            .iter()
            .filter(|(path, _)| &path.parent() == collection)
            .collect();
        matched.sort_by_key(|(_, stored)| stored.seq);
        matched
            .into_iter()
            .map(|(path, stored)| Document::new(path.clone(), stored.fields.clone()))
            .collect()
    }
}

/// Thread-safe document store held entirely in memory.
///
/// Listing returns documents in creation order; batches are applied under a
/// single write lock so readers never observe a partial batch.
#[derive(Debug, Default)]
pub struct InMemoryDocumentStore {
    state: RwLock<MemoryState>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored documents across all collections.
    pub fn len(&self) -> usize {
        self.read().map(|state| state.docs.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, path: &DocumentPath) -> bool {
        self.read()
            .map(|state| state.docs.contains_key(path))
            .unwrap_or(false)
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, MemoryState>> {
        self.state
            .read()
            .map_err(|_| StoreError::Unavailable("memory store lock poisoned".to_string()))
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, MemoryState>> {
        self.state
            .write()
            .map_err(|_| StoreError::Unavailable("memory store lock poisoned".to_string()))
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn get(&self, path: &DocumentPath) -> StoreResult<Option<Document>> {
        let state = self.read()?;
        Ok(state
            .docs
            .get(path)
            .map(|stored| Document::new(path.clone(), stored.fields.clone())))
    }

    async fn set(&self, path: &DocumentPath, fields: Fields) -> StoreResult<()> {
        self.write()?.put(path.clone(), fields);
        Ok(())
    }

    async fn update(&self, path: &DocumentPath, fields: Fields) -> StoreResult<()> {
        self.write()?.merge(path, fields)
    }

    async fn delete(&self, path: &DocumentPath) -> StoreResult<()> {
        self.write()?.docs.remove(path);
        Ok(())
    }

    async fn list(&self, collection: &CollectionPath) -> StoreResult<Vec<Document>> {
        Ok(self.read()?.children(collection))
    }

    async fn query(&self, query: &Query) -> StoreResult<Vec<Document>> {
        let documents = self.read()?.children(&query.collection);
        Ok(documents
            .into_iter()
            .filter(|document| query.matches(&document.fields))
            .collect())
    }

    async fn commit(&self, batch: WriteBatch) -> StoreResult<()> {
        let mut state = self.write()?;

        // Updates need an existing target, counting documents created
        // earlier in the same batch.
        let mut present: HashMap<&DocumentPath, bool> = HashMap::new();
        for op in batch.ops() {
            match op {
                WriteOp::Set { path, .. } => {
                    present.insert(path, true);
                }
                WriteOp::Delete { path } => {
                    present.insert(path, false);
                }
                WriteOp::Update { path, .. } => {
                    let exists = present
                        .get(path)
                        .copied()
                        .unwrap_or_else(|| state.docs.contains_key(path));
                    if !exists {
                        return Err(StoreError::BatchFailed(format!(
                            "update target {} does not exist",
                            path
                        )));
                    }
                }
            }
        }

        let count = batch.len();
        for op in batch.into_ops() {
            match op {
                WriteOp::Set { path, fields } => state.put(path, fields),
                WriteOp::Update { path, fields } => state.merge(&path, fields)?,
                WriteOp::Delete { path } => {
                    state.docs.remove(&path);
                }
            }
        }
        debug!("Committed batch of {} writes", count);
        Ok(())
    }
}
