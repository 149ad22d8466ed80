//! Remote document store trait.
//!
//! This trait is the only contract facades have with the backend. It is
//! backend-agnostic: the Firebase REST client, the in-memory store and test
//! doubles all implement it.

use async_trait::async_trait;

use super::store_model::{CollectionPath, Document, DocumentPath, Fields, Query, WriteBatch};
use crate::errors::StoreResult;

/// CRUD + query access to a hierarchical document store.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Reads a single document. Returns `None` if it does not exist.
    async fn get(&self, path: &DocumentPath) -> StoreResult<Option<Document>>;

    /// Creates the document or replaces all of its fields.
    async fn set(&self, path: &DocumentPath, fields: Fields) -> StoreResult<()>;

    /// Merges `fields` into an existing document.
    ///
    /// Fails with [`crate::errors::StoreError::NotFound`] if the document does not exist.
    async fn update(&self, path: &DocumentPath, fields: Fields) -> StoreResult<()>;

    /// Deletes a document. Deleting a missing document succeeds.
    async fn delete(&self, path: &DocumentPath) -> StoreResult<()>;

    /// Lists every document directly inside `collection`.
    ///
    /// Ordering is backend-defined and must not be relied upon.
    async fn list(&self, collection: &CollectionPath) -> StoreResult<Vec<Document>>;

    /// Lists documents inside the query's collection matching all filters.
    async fn query(&self, query: &Query) -> StoreResult<Vec<Document>>;

    /// Applies every write in `batch` atomically: either all writes are
    /// applied or none are.
    async fn commit(&self, batch: WriteBatch) -> StoreResult<()>;
}
