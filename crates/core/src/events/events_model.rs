//! Event domain models.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Kind of event. The picker offers a fixed catalogue, but any other stored
/// string is preserved as [`EventType::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EventType {
    #[default]
    Birthday,
    Wedding,
    Meeting,
    Conference,
    Party,
    Other(String),
}

impl EventType {
    /// Choices offered when creating an event.
    pub const CATALOGUE: [EventType; 5] = [
        EventType::Birthday,
        EventType::Wedding,
        EventType::Meeting,
        EventType::Conference,
        EventType::Party,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            EventType::Birthday => "Birthday",
            EventType::Wedding => "Wedding",
            EventType::Meeting => "Meeting",
            EventType::Conference => "Conference",
            EventType::Party => "Party",
            EventType::Other(value) => value,
        }
    }
}

impl From<String> for EventType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Birthday" => EventType::Birthday,
            "Wedding" => EventType::Wedding,
            "Meeting" => EventType::Meeting,
            "Conference" => EventType::Conference,
            "Party" => EventType::Party,
            _ => EventType::Other(value),
        }
    }
}

impl From<&str> for EventType {
    fn from(value: &str) -> Self {
        EventType::from(value.to_string())
    }
}

impl From<EventType> for String {
    fn from(value: EventType) -> Self {
        match value {
            EventType::Other(value) => value,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An event owned by one identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub name: String,
    pub event_type: EventType,
    pub event_date: DateTime<Utc>,
}

impl Event {
    /// Creates an event with a fresh id.
    pub fn new(name: impl Into<String>, event_type: EventType, event_date: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            event_type,
            event_date,
        }
    }

    /// Calendar day (UTC) the event takes place on.
    pub fn date(&self) -> NaiveDate {
        self.event_date.date_naive()
    }

    pub fn time_remaining(&self, now: DateTime<Utc>) -> TimeRemaining {
        let remaining = self.event_date - now;
        if remaining <= chrono::Duration::zero() {
            return TimeRemaining::Passed;
        }
        TimeRemaining::Upcoming {
            days: remaining.num_days(),
            hours: remaining.num_hours() % 24,
        }
    }
}

/// Countdown shown on the event detail screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeRemaining {
    Upcoming { days: i64, hours: i64 },
    Passed,
}

impl fmt::Display for TimeRemaining {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeRemaining::Upcoming { days, hours } => {
                write!(f, "{} days and {} hours", days, hours)
            }
            TimeRemaining::Passed => f.write_str("Event has passed."),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_event_type_round_trips_unknown_values() {
        let value = serde_json::to_value(EventType::Other("N/A".to_string())).unwrap();
        assert_eq!(value, json!("N/A"));

        let parsed: EventType = serde_json::from_value(json!("Work")).unwrap();
        assert_eq!(parsed, EventType::Other("Work".to_string()));

        let parsed: EventType = serde_json::from_value(json!("Wedding")).unwrap();
        assert_eq!(parsed, EventType::Wedding);
        assert_eq!(EventType::default(), EventType::Birthday);
    }

    #[test]
    fn test_event_serializes_camel_case() {
        let date = Utc.with_ymd_and_hms(2025, 6, 1, 18, 0, 0).unwrap();
        let event = Event {
            id: "e1".to_string(),
            name: "Sam's 30th".to_string(),
            event_type: EventType::Party,
            event_date: date,
        };
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["eventType"], json!("Party"));
        assert_eq!(value["eventDate"], json!("2025-06-01T18:00:00Z"));
    }

    #[test]
    fn test_new_generates_distinct_ids() {
        let date = Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap();
        let a = Event::new("A", EventType::Meeting, date);
        let b = Event::new("A", EventType::Meeting, date);
        assert_ne!(a.id, b.id);
        assert!(Uuid::parse_str(&a.id).is_ok());
    }

    #[test]
    fn test_time_remaining() {
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        let event = Event::new(
            "Wedding",
            EventType::Wedding,
            Utc.with_ymd_and_hms(2025, 6, 4, 17, 30, 0).unwrap(),
        );
        assert_eq!(
            event.time_remaining(now),
            TimeRemaining::Upcoming { days: 3, hours: 5 }
        );
        assert_eq!(event.time_remaining(now).to_string(), "3 days and 5 hours");

        let later = Utc.with_ymd_and_hms(2025, 6, 5, 0, 0, 0).unwrap();
        assert_eq!(event.time_remaining(later).to_string(), "Event has passed.");
        assert_eq!(event.time_remaining(event.event_date), TimeRemaining::Passed);
    }
}
