use async_trait::async_trait;
use log::debug;
use std::sync::Arc;

use super::guests_model::{Guest, RsvpStatus};
use super::guests_traits::GuestServiceTrait;
use crate::errors::{Error, Result, ValidationError};
use crate::events::{require_event, EventDependents};
use crate::session::{SessionCache, SessionScoped, SessionServiceTrait};
use crate::store::{decode_all, paths, to_fields, DocumentStore, WriteBatch, WriteOp};

/// Service for managing the guest list of an event
pub struct GuestService {
    store: Arc<dyn DocumentStore>,
    session: Arc<dyn SessionServiceTrait>,
    cache: SessionCache<Guest>,
}

impl GuestService {
    pub fn new(store: Arc<dyn DocumentStore>, session: Arc<dyn SessionServiceTrait>) -> Self {
        Self {
            store,
            session,
            cache: SessionCache::new("guests"),
        }
    }

    async fn load(&self, uid: &str, event_id: &str) -> Result<Vec<Guest>> {
        paths::validate_segment(event_id)?;
        let documents = self
            .store
            .list(&paths::invitations_collection(uid, event_id))
            .await?;
        Ok(decode_all(&documents))
    }

    /// Writes `next` as the full guest list, deleting guests of `previous`
    /// that are gone.
    async fn replace_all(
        &self,
        uid: &str,
        event_id: &str,
        previous: &[Guest],
        next: &[Guest],
    ) -> Result<()> {
        let collection = paths::invitations_collection(uid, event_id);
        let mut batch = WriteBatch::new();
        for guest in next {
            batch.set(collection.doc(&guest.id), to_fields(guest)?);
        }
        for gone in previous
            .iter()
            .filter(|old| !next.iter().any(|guest| guest.id == old.id))
        {
            batch.delete(collection.doc(&gone.id));
        }

        debug!(
            "Writing {} guests for event {} ({} writes)",
            next.len(),
            event_id,
            batch.len()
        );
        self.store.commit(batch).await?;
        Ok(())
    }

    /// Re-reads the list, applies `change` and writes the result back.
    async fn mutate<F, T>(&self, identity_id: &str, event_id: &str, change: F) -> Result<T>
    where
        F: FnOnce(&mut Vec<Guest>) -> Result<T> + Send,
        T: Send,
    {
        let identity = self.session.require_scope(identity_id)?;
        let generation = self.cache.generation();

        let previous = self.load(&identity.uid, event_id).await?;
        let mut next = previous.clone();
        let outcome = change(&mut next)?;

        self.replace_all(&identity.uid, event_id, &previous, &next)
            .await?;
        self.cache.replace(generation, event_id, next);
        Ok(outcome)
    }
}

fn guest_not_found(guest_id: &str) -> Error {
    Error::NotFound(format!("Guest {}", guest_id))
}

#[async_trait]
impl GuestServiceTrait for GuestService {
    async fn fetch(&self, identity_id: &str, event_id: &str) -> Result<Vec<Guest>> {
        let identity = self.session.require_scope(identity_id)?;
        let generation = self.cache.generation();

        let guests = self.load(&identity.uid, event_id).await?;
        self.cache.replace(generation, event_id, guests.clone());
        Ok(guests)
    }

    async fn add(&self, identity_id: &str, event_id: &str, name: &str) -> Result<Guest> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyField("Guest name".to_string()).into());
        }
        let identity = self.session.require_scope(identity_id)?;
        require_event(self.store.as_ref(), &identity.uid, event_id).await?;

        let guest = Guest::new(name);
        let added = guest.clone();
        self.mutate(identity_id, event_id, move |guests| {
            guests.push(added);
            Ok(())
        })
        .await?;
        Ok(guest)
    }

    async fn update_status(
        &self,
        identity_id: &str,
        event_id: &str,
        guest_id: &str,
        status: RsvpStatus,
    ) -> Result<Guest> {
        self.mutate(identity_id, event_id, |guests| {
            let guest = guests
                .iter_mut()
                .find(|guest| guest.id == guest_id)
                .ok_or_else(|| guest_not_found(guest_id))?;
            guest.status = status;
            Ok(guest.clone())
        })
        .await
    }

    async fn delete(&self, identity_id: &str, event_id: &str, guest_id: &str) -> Result<()> {
        self.mutate(identity_id, event_id, |guests| {
            let index = guests
                .iter()
                .position(|guest| guest.id == guest_id)
                .ok_or_else(|| guest_not_found(guest_id))?;
            guests.remove(index);
            Ok(())
        })
        .await
    }

    fn cached_guests(&self, event_id: &str) -> Vec<Guest> {
        self.cache.get(event_id).unwrap_or_default()
    }
}

#[async_trait]
impl EventDependents for GuestService {
    async fn dependent_deletes(&self, identity_id: &str, event_id: &str) -> Result<Vec<WriteOp>> {
        let documents = self
            .store
            .list(&paths::invitations_collection(identity_id, event_id))
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

impl SessionScoped for GuestService {
    fn clear_session_data(&self) {
        self.cache.clear();
    }
}
