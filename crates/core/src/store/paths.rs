//! Locations of planner data in the document store.
//!
//! ```text
//! users/{uid}                                      profile
//! users/{uid}/events/{eventId}                     events
//! users/{uid}/events/{eventId}/invitations/{id}    guests
//! foodItems/{id}                                   food items (eventId field)
//! tasks/{id}                                       tasks (eventId field)
//! ```

use super::store_model::{CollectionPath, DocumentPath};
use crate::constants::{EVENTS_COLLECTION, INVITATIONS_COLLECTION, USERS_COLLECTION};
use crate::errors::ValidationError;

/// Profile document of an identity.
pub fn user_doc(uid: &str) -> DocumentPath {
    CollectionPath::root(USERS_COLLECTION).doc(uid)
}

/// Events owned by an identity.
pub fn events_collection(uid: &str) -> CollectionPath {
    user_doc(uid).collection(EVENTS_COLLECTION)
}

/// Guests of one event.
pub fn invitations_collection(uid: &str, event_id: &str) -> CollectionPath {
    events_collection(uid)
        .doc(event_id)
        .collection(INVITATIONS_COLLECTION)
}

/// Rejects identifiers that cannot be used as a single path segment.
pub fn validate_segment(id: &str) -> Result<(), ValidationError> {
    if id.is_empty() || id.contains('/') || id == "." || id == ".." {
        return Err(ValidationError::InvalidId(id.to_string()));
    }
    Ok(())
}
