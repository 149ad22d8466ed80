//! Conversions between domain models and document fields.
//!
//! Models serialize with an `id` field; the id is carried by the document
//! path instead, so it is stripped on encode and restored on decode.

use log::warn;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use super::store_model::{Document, Fields};
use crate::errors::{StoreError, StoreResult};

const ID_FIELD: &str = "id";

/// Encodes a model as document fields.
pub fn to_fields<T: Serialize>(model: &T) -> StoreResult<Fields> {
    match serde_json::to_value(model)? {
        Value::Object(mut fields) => {
            fields.remove(ID_FIELD);
            Ok(fields)
        }
        other => Err(StoreError::MalformedDocument {
            path: String::new(),
            message: format!("expected an object, got {}", other),
        }),
    }
}

/// Decodes a document into a model, taking the id from the path.
pub fn from_document<T: DeserializeOwned>(document: &Document) -> StoreResult<T> {
    let mut fields = document.fields.clone();
    fields.insert(ID_FIELD.to_string(), Value::String(document.id().to_string()));
    serde_json::from_value(Value::Object(fields)).map_err(|e| StoreError::MalformedDocument {
        path: document.path.to_string(),
        message: e.to_string(),
    })
}

/// Decodes every document, skipping (and logging) the ones that do not fit
/// the model.
pub fn decode_all<T: DeserializeOwned>(documents: &[Document]) -> Vec<T> {
    documents
        .iter()
        .filter_map(|document| match from_document(document) {
            Ok(model) => Some(model),
            Err(e) => {
                warn!("Skipping document: {}", e);
                None
            }
        })
        .collect()
}
