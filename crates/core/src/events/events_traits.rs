use async_trait::async_trait;
use chrono::NaiveDate;

use super::events_model::Event;
use crate::errors::Result;
use crate::store::WriteOp;

/// Trait for event service operations
#[async_trait]
pub trait EventServiceTrait: Send + Sync {
    /// Reads every event of the identity and refreshes the local cache.
    async fn list(&self, identity_id: &str) -> Result<Vec<Event>>;

    async fn add(&self, identity_id: &str, event: Event) -> Result<()>;

    /// Deletes the event together with everything that references it.
    async fn delete(&self, identity_id: &str, event: &Event) -> Result<()>;

    /// Cached events of the signed-in identity.
    fn current_events(&self) -> Vec<Event>;

    /// Cached events falling on `date` (UTC calendar day).
    fn events_on(&self, date: NaiveDate) -> Vec<Event>;
}

/// Data stored under or alongside an event that must go when it goes.
#[async_trait]
pub trait EventDependents: Send + Sync {
    /// Delete writes for every child of the event.
    async fn dependent_deletes(&self, identity_id: &str, event_id: &str) -> Result<Vec<WriteOp>>;

    /// Drops cached children once the event is gone.
    fn forget_event(&self, event_id: &str);
}
