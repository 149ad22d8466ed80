//! Document store backed by the document database REST API.

use async_trait::async_trait;
use log::{debug, warn};
use planorama_core::errors::{StoreError, StoreResult};
use planorama_core::store::{
    CollectionPath, Document, DocumentPath, DocumentStore, Fields, Query, WriteBatch, WriteOp,
};
use reqwest::{Method, RequestBuilder, StatusCode};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::auth::TokenSource;
use crate::client::{http_client, parse_response, response_text};
use crate::error::{FirebaseError, Result};
use crate::types::{ListDocumentsResponse, RestDocument, RunQueryItem};
use crate::value::{decode_fields, encode_fields, encode_value};

const PAGE_SIZE: u32 = 300;

/// REST client for one project's `(default)` database.
pub struct FirestoreClient {
    client: reqwest::Client,
    base_url: String,
    project_id: String,
    tokens: Option<Arc<dyn TokenSource>>,
}

impl FirestoreClient {
    /// * `base_url` - e.g. "https://firestore.googleapis.com"
    pub fn new(project_id: &str, base_url: &str) -> Self {
        Self {
            client: http_client(),
            base_url: base_url.trim_end_matches('/').to_string(),
            project_id: project_id.to_string(),
            tokens: None,
        }
    }

    /// Authorizes requests with the signed-in user's ID token.
    pub fn with_token_source(mut self, tokens: Arc<dyn TokenSource>) -> Self {
        self.tokens = Some(tokens);
        self
    }

    /// Resource name of the documents root,
    /// `projects/{project}/databases/(default)/documents`.
    fn documents_root(&self) -> String {
        format!("projects/{}/databases/(default)/documents", self.project_id)
    }

    fn document_name(&self, path: &DocumentPath) -> String {
        format!("{}/{}", self.documents_root(), path)
    }

    fn url(&self, resource: &str) -> String {
        format!("{}/v1/{}", self.base_url, resource)
    }

    fn document_url(&self, path: &DocumentPath) -> String {
        self.url(&self.document_name(path))
    }

    fn collection_url(&self, collection: &CollectionPath) -> String {
        self.url(&format!("{}/{}", self.documents_root(), collection))
    }

    /// Queries run against the parent of the collection.
    fn run_query_url(&self, collection: &CollectionPath) -> String {
        match collection.parent_document() {
            Some(parent) => format!("{}:runQuery", self.document_url(&parent)),
            None => format!("{}:runQuery", self.url(&self.documents_root())),
        }
    }

    fn commit_url(&self) -> String {
        format!("{}:commit", self.url(&self.documents_root()))
    }

    async fn request(&self, method: Method, url: &str) -> RequestBuilder {
        let builder = self.client.request(method, url);
        let token = match &self.tokens {
            Some(tokens) => tokens.id_token().await,
            None => None,
        };
        match token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    fn to_document(&self, rest: RestDocument) -> Result<Document> {
        let prefix = format!("{}/", self.documents_root());
        let path = rest.name.strip_prefix(&prefix).ok_or_else(|| {
            FirebaseError::invalid_response(format!("document outside database: {}", rest.name))
        })?;
        let path = match path.rsplit_once('/') {
            Some((collection, id)) if !collection.is_empty() => {
                collection_from_str(collection).doc(id)
            }
            _ => return Err(FirebaseError::invalid_response(format!("bad name {}", rest.name))),
        };
        Ok(Document::new(path, decode_fields(&rest.fields)?))
    }

    /// Converts service documents, skipping ones whose fields cannot be
    /// decoded.
    fn to_documents(&self, rest: Vec<RestDocument>) -> Vec<Document> {
        rest.into_iter()
            .filter_map(|rest| {
                let name = rest.name.clone();
                match self.to_document(rest) {
                    Ok(document) => Some(document),
                    Err(e) => {
                        warn!("Skipping document {}: {}", name, e);
                        None
                    }
                }
            })
            .collect()
    }

    fn write_json(&self, op: &WriteOp) -> Value {
        match op {
            WriteOp::Set { path, fields } => json!({
                "update": { "name": self.document_name(path), "fields": encode_fields(fields) }
            }),
            WriteOp::Update { path, fields } => json!({
                "update": { "name": self.document_name(path), "fields": encode_fields(fields) },
                "updateMask": { "fieldPaths": fields.keys().collect::<Vec<_>>() },
                "currentDocument": { "exists": true }
            }),
            WriteOp::Delete { path } => json!({ "delete": self.document_name(path) }),
        }
    }

    async fn fetch_document(&self, path: &DocumentPath) -> Result<Option<Document>> {
        let response = self
            .request(Method::GET, &self.document_url(path))
            .await
            .send()
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let rest: RestDocument = parse_response(response).await?;
        self.to_document(rest).map(Some)
    }

    async fn patch_document(
        &self,
        path: &DocumentPath,
        fields: Fields,
        merge: bool,
    ) -> Result<()> {
        let mut url = self.document_url(path);
        if merge {
            let mask: Vec<String> = fields
                .keys()
                .map(|field| format!("updateMask.fieldPaths={}", urlencoding::encode(field)))
                .collect();
            url = format!("{}?{}&currentDocument.exists=true", url, mask.join("&"));
        }
        let response = self
            .request(Method::PATCH, &url)
            .await
            .json(&json!({ "fields": encode_fields(&fields) }))
            .send()
            .await?;
        response_text(response).await?;
        Ok(())
    }

    async fn delete_document(&self, path: &DocumentPath) -> Result<()> {
        let response = self
            .request(Method::DELETE, &self.document_url(path))
            .await
            .send()
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(());
        }
        response_text(response).await?;
        Ok(())
    }

    async fn list_documents(&self, collection: &CollectionPath) -> Result<Vec<Document>> {
        let mut documents = Vec::new();
        let mut page_token: Option<String> = None;
        loop {
            let mut url = format!("{}?pageSize={}", self.collection_url(collection), PAGE_SIZE);
            if let Some(token) = &page_token {
                url.push_str(&format!("&pageToken={}", urlencoding::encode(token)));
            }
            let page: ListDocumentsResponse =
                parse_response(self.request(Method::GET, &url).await.send().await?).await?;
            documents.extend(self.to_documents(page.documents));

            match page.next_page_token.filter(|token| !token.is_empty()) {
                Some(token) => page_token = Some(token),
                None => break,
            }
        }
        debug!("Listed {} documents in {}", documents.len(), collection);
        Ok(documents)
    }

    async fn run_query(&self, query: &Query) -> Result<Vec<Document>> {
        let response = self
            .request(Method::POST, &self.run_query_url(&query.collection))
            .await
            .json(&structured_query(query))
            .send()
            .await?;
        let items: Vec<RunQueryItem> = parse_response(response).await?;
        Ok(self.to_documents(items.into_iter().filter_map(|item| item.document).collect()))
    }

    async fn commit_writes(&self, batch: &WriteBatch) -> Result<()> {
        let writes: Vec<Value> = batch.ops().iter().map(|op| self.write_json(op)).collect();
        let response = self
            .request(Method::POST, &self.commit_url())
            .await
            .json(&json!({ "writes": writes }))
            .send()
            .await?;
        response_text(response).await?;
        Ok(())
    }
}

fn collection_from_str(path: &str) -> CollectionPath {
    let mut segments = path.split('/');
    let mut collection = CollectionPath::root(segments.next().unwrap_or_default());
    while let (Some(doc), Some(sub)) = (segments.next(), segments.next()) {
        collection = collection.doc(doc).collection(sub);
    }
    collection
}

/// Body of a `:runQuery` request for an equality query.
fn structured_query(query: &Query) -> Value {
    let mut filters: Vec<Value> = query
        .filters
        .iter()
        .map(|filter| {
            json!({
                "fieldFilter": {
                    "field": { "fieldPath": filter.field },
                    "op": "EQUAL",
                    "value": encode_value(&filter.value)
                }
            })
        })
        .collect();

    let mut structured = json!({
        "from": [{ "collectionId": query.collection.collection_id() }]
    });
    if filters.len() == 1 {
        structured["where"] = filters.remove(0);
    } else if !filters.is_empty() {
        structured["where"] = json!({ "compositeFilter": { "op": "AND", "filters": filters } });
    }
    json!({ "structuredQuery": structured })
}

#[async_trait]
impl DocumentStore for FirestoreClient {
    async fn get(&self, path: &DocumentPath) -> StoreResult<Option<Document>> {
        self.fetch_document(path)
            .await
            .map_err(|e| e.into_store_error(path.as_str(), StoreError::ReadFailed))
    }

    async fn set(&self, path: &DocumentPath, fields: Fields) -> StoreResult<()> {
        self.patch_document(path, fields, false)
            .await
            .map_err(|e| e.into_store_error(path.as_str(), StoreError::WriteFailed))
    }

    async fn update(&self, path: &DocumentPath, fields: Fields) -> StoreResult<()> {
        self.patch_document(path, fields, true)
            .await
            .map_err(|e| e.into_store_error(path.as_str(), StoreError::WriteFailed))
    }

    async fn delete(&self, path: &DocumentPath) -> StoreResult<()> {
        self.delete_document(path)
            .await
            .map_err(|e| e.into_store_error(path.as_str(), StoreError::DeleteFailed))
    }

    async fn list(&self, collection: &CollectionPath) -> StoreResult<Vec<Document>> {
        self.list_documents(collection)
            .await
            .map_err(|e| e.into_store_error(collection.as_str(), StoreError::ReadFailed))
    }

    async fn query(&self, query: &Query) -> StoreResult<Vec<Document>> {
        self.run_query(query)
            .await
            .map_err(|e| e.into_store_error(query.collection.as_str(), StoreError::ReadFailed))
    }

    async fn commit(&self, batch: WriteBatch) -> StoreResult<()> {
        let target = format!("batch of {} writes", batch.len());
        self.commit_writes(&batch).await.map_err(|e| match e {
            // A failed update precondition rejects the whole batch.
            FirebaseError::Api {
                status: 404,
                message,
            } => StoreError::BatchFailed(message),
            other => other.into_store_error(&target, StoreError::BatchFailed),
        })
    }
}
