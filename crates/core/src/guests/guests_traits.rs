use async_trait::async_trait;

use super::guests_model::{Guest, RsvpStatus};
use crate::errors::Result;

/// Trait for guest list operations
///
/// Every mutation rewrites the whole list of the event; concurrent editors
/// overwrite each other (last writer wins).
#[async_trait]
pub trait GuestServiceTrait: Send + Sync {
    async fn fetch(&self, identity_id: &str, event_id: &str) -> Result<Vec<Guest>>;

    /// Invites `name` with no answer yet.
    async fn add(&self, identity_id: &str, event_id: &str, name: &str) -> Result<Guest>;

    async fn update_status(
        &self,
        identity_id: &str,
        event_id: &str,
        guest_id: &str,
        status: RsvpStatus,
    ) -> Result<Guest>;

    async fn delete(&self, identity_id: &str, event_id: &str, guest_id: &str) -> Result<()>;

    /// Last fetched or written list of the event.
    fn cached_guests(&self, event_id: &str) -> Vec<Guest>;
}
