//! Events module - domain models, services, and traits.

mod events_model;
mod events_service;
mod events_traits;

#[cfg(test)]
mod events_service_tests;

pub use events_model::{Event, EventType, TimeRemaining};
pub use events_service::EventService;
pub(crate) use events_service::require_event;
pub use events_traits::{EventDependents, EventServiceTrait};
