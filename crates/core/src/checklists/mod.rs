//! Checklists module - per-event food items and tasks.

mod checklists_model;
mod checklists_service;
mod checklists_traits;


pub use checklists_model::{ChecklistItem, ChecklistKind};
pub use checklists_service::ChecklistService;
pub use checklists_traits::ChecklistServiceTrait;
