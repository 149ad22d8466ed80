use async_trait::async_trait;
use chrono::NaiveDate;
use futures::future::try_join_all;
use log::debug;
use std::sync::Arc;

use super::events_model::Event;
use super::events_traits::{EventDependents, EventServiceTrait};
use crate::errors::{Error, Result, ValidationError};
use crate::session::{SessionCache, SessionScoped, SessionServiceTrait};
use crate::store::{decode_all, paths, to_fields, DocumentStore, WriteBatch};

/// Service for managing a user's events
pub struct EventService {
    store: Arc<dyn DocumentStore>,
    session: Arc<dyn SessionServiceTrait>,
    dependents: Vec<Arc<dyn EventDependents>>,
    cache: SessionCache<Event>,
}

impl EventService {
    pub fn new(
        store: Arc<dyn DocumentStore>,
        session: Arc<dyn SessionServiceTrait>,
        dependents: Vec<Arc<dyn EventDependents>>,
    ) -> Self {
        Self {
            store,
            session,
            dependents,
            cache: SessionCache::new("events"),
        }
    }
}

/// Fails with [`Error::NotFound`] unless `uid` owns an event `event_id`.
pub(crate) async fn require_event(
    store: &dyn DocumentStore,
    uid: &str,
    event_id: &str,
) -> Result<()> {
    paths::validate_segment(event_id)?;
    match store.get(&paths::events_collection(uid).doc(event_id)).await? {
        Some(_) => Ok(()),
        None => Err(Error::NotFound(format!("Event {}", event_id))),
    }
}

#[async_trait]
impl EventServiceTrait for EventService {
    async fn list(&self, identity_id: &str) -> Result<Vec<Event>> {
        let identity = self.session.require_scope(identity_id)?;
        let generation = self.cache.generation();

        let documents = self
            .store
            .list(&paths::events_collection(&identity.uid))
            .await?;
        let events: Vec<Event> = decode_all(&documents);

        self.cache.replace(generation, &identity.uid, events.clone());
        Ok(events)
    }

    async fn add(&self, identity_id: &str, event: Event) -> Result<()> {
        let identity = self.session.require_scope(identity_id)?;
        if event.name.trim().is_empty() {
            return Err(ValidationError::EmptyField("Event name".to_string()).into());
        }
        paths::validate_segment(&event.id)?;
        let generation = self.cache.generation();

        let path = paths::events_collection(&identity.uid).doc(&event.id);
        self.store.set(&path, to_fields(&event)?).await?;
        debug!("Added event {}", event.id);

        self.cache
            .update(generation, &identity.uid, |events| events.push(event));
        Ok(())
    }

    async fn delete(&self, identity_id: &str, event: &Event) -> Result<()> {
        let identity = self.session.require_scope(identity_id)?;
        paths::validate_segment(&event.id)?;
        let generation = self.cache.generation();

        let child_ops = try_join_all(
            self.dependents
                .iter()
                .map(|dependent| dependent.dependent_deletes(&identity.uid, &event.id)),
        )
        .await?;
        let batch: WriteBatch = child_ops.into_iter().flatten().collect();

        // Children first: if their batch fails the event stays, so the delete
        // can simply be retried.
        if !batch.is_empty() {
            debug!(
                "Deleting {} children of event {}",
                batch.len(),
                event.id
            );
            self.store.commit(batch).await?;
        }

        let path = paths::events_collection(&identity.uid).doc(&event.id);
        self.store.delete(&path).await?;
        debug!("Deleted event {}", event.id);

        for dependent in &self.dependents {
            dependent.forget_event(&event.id);
        }
        self.cache.update(generation, &identity.uid, |events| {
            events.retain(|cached| cached.id != event.id)
        });
        Ok(())
    }

    fn current_events(&self) -> Vec<Event> {
        self.session
            .current_identity()
            .and_then(|identity| self.cache.get(&identity.uid))
            .unwrap_or_default()
    }

    fn events_on(&self, date: NaiveDate) -> Vec<Event> {
        self.current_events()
            .into_iter()
            .filter(|event| event.date() == date)
            .collect()
    }
}

impl SessionScoped for EventService {
    fn clear_session_data(&self) {
        self.cache.clear();
    }
}
