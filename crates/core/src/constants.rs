/// Top-level collection holding one profile document per identity
pub const USERS_COLLECTION: &str = "users";

/// Per-user sub-collection of events
pub const EVENTS_COLLECTION: &str = "events";

/// Per-event sub-collection of guests
pub const INVITATIONS_COLLECTION: &str = "invitations";

/// Flat collection of food checklist items
pub const FOOD_ITEMS_COLLECTION: &str = "foodItems";

/// Flat collection of task checklist items
pub const TASKS_COLLECTION: &str = "tasks";

/// Foreign key linking checklist items to their event
pub const EVENT_ID_FIELD: &str = "eventId";

/// Identity that owns a checklist item
pub const OWNER_ID_FIELD: &str = "ownerId";

/// Completion flag patched in place by checklist toggles
pub const IS_COMPLETED_FIELD: &str = "isCompleted";

/// Event type recorded on the profile written at sign-up
pub const SIGN_UP_EVENT_TYPE: &str = "N/A";

/// Shortest password the in-memory auth provider accepts
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Default bound on any single remote call, in seconds
pub const DEFAULT_REMOTE_TIMEOUT_SECS: u64 = 15;

/// Shown in place of weather values that could not be fetched
pub const WEATHER_PLACEHOLDER: &str = "--";

/// Default weather location (New York City)
pub const DEFAULT_WEATHER_LATITUDE: f64 = 40.7128;
pub const DEFAULT_WEATHER_LONGITUDE: f64 = -74.006;
