//! Document store abstraction and the planner's storage layout.

mod memory_store;
pub mod paths;
mod store_codec;
mod store_model;
mod store_traits;
mod timeout_store;

pub use memory_store::InMemoryDocumentStore;
pub use store_codec::{decode_all, from_document, to_fields};
pub use store_model::{
    CollectionPath, Document, DocumentPath, FieldFilter, Fields, Query, WriteBatch, WriteOp,
};
pub use store_traits::DocumentStore;
pub use timeout_store::TimeoutDocumentStore;
