use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::events::EventType;

/// The authenticated user. Read-only once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub uid: String,
    pub email: String,
}

/// Input collected by the sign-up form.
#[derive(Debug, Clone, PartialEq)]
pub struct SignUpDetails {
    pub email: String,
    pub password: String,
    pub name: String,
    pub event_type: EventType,
    pub event_date: DateTime<Utc>,
}

impl SignUpDetails {
    /// Details as submitted by the sign-up screen, which has no event picker.
    pub fn from_form(
        email: impl Into<String>,
        password: impl Into<String>,
        name: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            name: name.into(),
            event_type: EventType::from(crate::constants::SIGN_UP_EVENT_TYPE),
            event_date: now,
        }
    }

    pub fn profile(&self) -> UserProfile {
        UserProfile {
            email: self.email.trim().to_string(),
            name: self.name.clone(),
            event_type: self.event_type.clone(),
            event_date: self.event_date,
        }
    }
}

/// Profile document stored at `users/{uid}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub email: String,
    pub name: String,
    pub event_type: EventType,
    pub event_date: DateTime<Utc>,
}
