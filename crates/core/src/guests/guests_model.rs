use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// RSVP answer of a guest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RsvpStatus {
    Attending,
    NotAttending,
    #[default]
    NoAnswer,
}

impl RsvpStatus {
    /// Display order of the guest list sections.
    pub const ORDER: [RsvpStatus; 3] = [
        RsvpStatus::Attending,
        RsvpStatus::NotAttending,
        RsvpStatus::NoAnswer,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RsvpStatus::Attending => "attending",
            RsvpStatus::NotAttending => "not-attending",
            RsvpStatus::NoAnswer => "no-answer",
        }
    }
}

impl fmt::Display for RsvpStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An invitee of one event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Guest {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub status: RsvpStatus,
}

impl Guest {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            status: RsvpStatus::NoAnswer,
        }
    }
}

/// Guests sharing one RSVP status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuestGroup {
    pub status: RsvpStatus,
    pub guests: Vec<Guest>,
}

/// Splits guests into sections ordered attending, not attending, no answer.
/// Empty sections are left out; guests keep their relative order.
pub fn group_by_status(guests: &[Guest]) -> Vec<GuestGroup> {
    RsvpStatus::ORDER
        .iter()
        .filter_map(|status| {
            let members: Vec<Guest> = guests
                .iter()
                .filter(|guest| guest.status == *status)
                .cloned()
                .collect();
            (!members.is_empty()).then(|| GuestGroup {
                status: *status,
                guests: members,
            })
        })
        .collect()
}
