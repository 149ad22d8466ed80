use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::constants::{FOOD_ITEMS_COLLECTION, TASKS_COLLECTION};

/// The two per-event checklists. Both share one storage shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChecklistKind {
    Food,
    Tasks,
}

impl ChecklistKind {
    /// Top-level collection holding items of this kind.
    pub fn collection_id(&self) -> &'static str {
        match self {
            ChecklistKind::Food => FOOD_ITEMS_COLLECTION,
            ChecklistKind::Tasks => TASKS_COLLECTION,
        }
    }
}

impl fmt::Display for ChecklistKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChecklistKind::Food => f.write_str("food"),
            ChecklistKind::Tasks => f.write_str("tasks"),
        }
    }
}

/// A food item or task attached to an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistItem {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub is_completed: bool,
    pub event_id: String,
    /// Items live in flat collections; reads filter on the owner.
    #[serde(default)]
    pub owner_id: String,
}

impl ChecklistItem {
    pub fn new(
        name: impl Into<String>,
        event_id: impl Into<String>,
        owner_id: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            is_completed: false,
            event_id: event_id.into(),
            owner_id: owner_id.into(),
        }
    }
}
