//! Guests module - per-event guest lists grouped by RSVP status.

mod guests_model;
mod guests_service;
mod guests_traits;

#[cfg(test)]
mod guests_service_tests;

pub use guests_model::{group_by_status, Guest, GuestGroup, RsvpStatus};
pub use guests_service::GuestService;
pub use guests_traits::GuestServiceTrait;
