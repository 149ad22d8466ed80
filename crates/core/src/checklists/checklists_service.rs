use async_trait::async_trait;
use log::{debug, warn};
use serde_json::Value;
use std::sync::Arc;

use super::checklists_model::{ChecklistItem, ChecklistKind};
use super::checklists_traits::ChecklistServiceTrait;
use crate::constants::{EVENT_ID_FIELD, IS_COMPLETED_FIELD, OWNER_ID_FIELD};
use crate::errors::{Result, StoreError, ValidationError};
use crate::events::{require_event, EventDependents};
use crate::session::{SessionCache, SessionScoped, SessionServiceTrait};
use crate::store::{
    decode_all, from_document, paths, to_fields, CollectionPath, DocumentPath, DocumentStore,
    Fields, Query, WriteOp,
};

/// Service for one checklist kind; food and tasks each get an instance.
pub struct ChecklistService {
    kind: ChecklistKind,
    store: Arc<dyn DocumentStore>,
    session: Arc<dyn SessionServiceTrait>,
    cache: SessionCache<ChecklistItem>,
}

impl ChecklistService {
    pub fn new(
        kind: ChecklistKind,
        store: Arc<dyn DocumentStore>,
        session: Arc<dyn SessionServiceTrait>,
    ) -> Self {
        let cache_name = match kind {
            ChecklistKind::Food => "food items",
            ChecklistKind::Tasks => "tasks",
        };
        Self {
            kind,
            store,
            session,
            cache: SessionCache::new(cache_name),
        }
    }

    fn collection(&self) -> CollectionPath {
        CollectionPath::root(self.kind.collection_id())
    }

    fn item_path(&self, item: &ChecklistItem) -> Result<DocumentPath> {
        paths::validate_segment(&item.id)?;
        Ok(self.collection().doc(&item.id))
    }

    fn by_event(&self, uid: &str, event_id: &str) -> Query {
        Query::collection(self.collection())
            .where_eq(EVENT_ID_FIELD, event_id)
            .where_eq(OWNER_ID_FIELD, uid)
    }

    fn cached(&self, item: &ChecklistItem) -> Option<ChecklistItem> {
        self.cache
            .get(&item.event_id)
            .and_then(|items| items.into_iter().find(|cached| cached.id == item.id))
    }

    /// The item as this identity sees it: the cached copy, else the stored
    /// document. Items of other identities read as missing.
    async fn current(&self, uid: &str, item: &ChecklistItem) -> Result<ChecklistItem> {
        if let Some(cached) = self.cached(item) {
            return Ok(cached);
        }
        let path = self.item_path(item)?;
        let stored = match self.store.get(&path).await? {
            Some(document) => from_document::<ChecklistItem>(&document)?,
            None => return Err(StoreError::NotFound(path.to_string()).into()),
        };
        if stored.owner_id != uid {
            warn!("Refusing access to {} {} of another identity", self.kind, item.id);
            return Err(StoreError::NotFound(path.to_string()).into());
        }
        Ok(stored)
    }

    fn set_cached_completion(&self, generation: u64, item: &ChecklistItem, value: bool) -> bool {
        self.cache.update(generation, &item.event_id, |items| {
            if let Some(cached) = items.iter_mut().find(|cached| cached.id == item.id) {
                cached.is_completed = value;
            }
        })
    }
}

#[async_trait]
impl ChecklistServiceTrait for ChecklistService {
    fn kind(&self) -> ChecklistKind {
        self.kind
    }

    async fn fetch(&self, event_id: &str) -> Result<Vec<ChecklistItem>> {
        let identity = self.session.require_identity()?;
        paths::validate_segment(event_id)?;
        let generation = self.cache.generation();

        let documents = self
            .store
            .query(&self.by_event(&identity.uid, event_id))
            .await?;
        let items: Vec<ChecklistItem> = decode_all(&documents);
        debug!("Fetched {} {} for event {}", items.len(), self.kind, event_id);

        self.cache.replace(generation, event_id, items.clone());
        Ok(items)
    }

    async fn add(&self, event_id: &str, name: &str) -> Result<ChecklistItem> {
        let identity = self.session.require_identity()?;
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyField("Item name".to_string()).into());
        }
        let generation = self.cache.generation();
        require_event(self.store.as_ref(), &identity.uid, event_id).await?;

        let item = ChecklistItem::new(name, event_id, identity.uid);
        self.store
            .set(&self.collection().doc(&item.id), to_fields(&item)?)
            .await?;

        let cached = item.clone();
        self.cache
            .update(generation, event_id, |items| items.push(cached));
        Ok(item)
    }

    async fn toggle_completion(&self, item: &ChecklistItem) -> Result<()> {
        let identity = self.session.require_identity()?;
        let path = self.item_path(item)?;
        let generation = self.cache.generation();

        let previous = self.current(&identity.uid, item).await?.is_completed;
        let next = !previous;
        self.set_cached_completion(generation, item, next);

        let mut patch = Fields::new();
        patch.insert(IS_COMPLETED_FIELD.to_string(), Value::Bool(next));
        if let Err(e) = self.store.update(&path, patch).await {
            warn!("Reverting completion of {} {}: {}", self.kind, item.id, e);
            self.set_cached_completion(generation, item, previous);
            return Err(e.into());
        }
        Ok(())
    }

    async fn delete(&self, item: &ChecklistItem) -> Result<()> {
        let identity = self.session.require_identity()?;
        let path = self.item_path(item)?;
        let generation = self.cache.generation();

        self.current(&identity.uid, item).await?;
        self.store.delete(&path).await?;
        self.cache.update(generation, &item.event_id, |items| {
            items.retain(|cached| cached.id != item.id)
        });
        Ok(())
    }

    async fn delete_many(&self, items: &[ChecklistItem]) -> Result<()> {
        let identity = self.session.require_identity()?;
        let generation = self.cache.generation();

        let mut deleted: Vec<&ChecklistItem> = Vec::new();
        let mut failed_ids = Vec::new();
        for item in items {
            let outcome: Result<()> = match self.item_path(item) {
                Ok(path) => match self.current(&identity.uid, item).await {
                    Ok(_) => self.store.delete(&path).await.map_err(Into::into),
                    Err(e) => Err(e),
                },
                Err(e) => Err(e),
            };
            match outcome {
                Ok(()) => deleted.push(item),
                Err(e) => {
                    warn!("Failed to delete {} {}: {}", self.kind, item.id, e);
                    failed_ids.push(item.id.clone());
                }
            }
        }

        for item in &deleted {
            self.cache.update(generation, &item.event_id, |cached| {
                cached.retain(|c| c.id != item.id)
            });
        }

        if !failed_ids.is_empty() {
            return Err(StoreError::PartialFailure { failed_ids }.into());
        }
        Ok(())
    }

    fn cached_items(&self, event_id: &str) -> Vec<ChecklistItem> {
        self.cache.get(event_id).unwrap_or_default()
    }
}

#[async_trait]
impl EventDependents for ChecklistService {
    async fn dependent_deletes(&self, identity_id: &str, event_id: &str) -> Result<Vec<WriteOp>> {
        let documents = self
            .store
            .query(&self.by_event(identity_id, event_id))
            .await?;
        Ok(documents
            .into_iter()
            .map(|document| WriteOp::Delete {
                path: document.path,
            })
            .collect())
    }

    fn forget_event(&self, event_id: &str) {
        self.cache.remove_scope(event_id);
    }
}

impl SessionScoped for ChecklistService {
    fn clear_session_data(&self) {
        self.cache.clear();
    }
}
