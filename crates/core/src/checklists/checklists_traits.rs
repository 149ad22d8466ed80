use async_trait::async_trait;

use super::checklists_model::{ChecklistItem, ChecklistKind};
use crate::errors::Result;

/// Trait for checklist (food / tasks) operations
#[async_trait]
pub trait ChecklistServiceTrait: Send + Sync {
    fn kind(&self) -> ChecklistKind;

    /// Items attached to `event_id`.
    async fn fetch(&self, event_id: &str) -> Result<Vec<ChecklistItem>>;

    async fn add(&self, event_id: &str, name: &str) -> Result<ChecklistItem>;

    /// Flips completion of the item. The cache changes immediately and is
    /// restored if the remote write fails.
    async fn toggle_completion(&self, item: &ChecklistItem) -> Result<()>;

    async fn delete(&self, item: &ChecklistItem) -> Result<()>;

    /// Deletes each item independently. Fails with
    /// [`crate::errors::StoreError::PartialFailure`] listing the items that
    /// could not be deleted; the others stay deleted.
    async fn delete_many(&self, items: &[ChecklistItem]) -> Result<()>;

    fn cached_items(&self, event_id: &str) -> Vec<ChecklistItem>;
}
