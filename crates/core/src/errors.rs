//! Core error types for the Planorama planner.
//!
//! Backend-specific failures (HTTP, REST payloads, SDK errors) are converted
//! into [`AuthError`] and [`StoreError`] by the backend crates so that this
//! type stays backend-agnostic.

use planorama_weather::FetchError;
use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Result type used by [`crate::store::DocumentStore`] implementations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Result type used by [`crate::session::AuthProvider`] implementations.
pub type AuthResult<T> = std::result::Result<T, AuthError>;

/// Root error type for the planner.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Authentication failed: {0}")]
    Auth(#[from] AuthError),

    #[error("Store operation failed: {0}")]
    Store(#[from] StoreError),

    #[error("Weather lookup failed: {0}")]
    Weather(#[from] FetchError),

    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("No user is signed in")]
    NotSignedIn,

    #[error("Identity {requested} is not the signed-in identity")]
    IdentityMismatch { requested: String },

    #[error("Invalid configuration value: {0}")]
    InvalidConfigValue(String),

    #[error("Missing configuration key: {0}")]
    MissingConfigKey(String),
}

impl Error {
    /// A message suitable for showing next to the form that triggered the
    /// operation.
    pub fn user_message(&self) -> String {
        match self {
            Error::Auth(err) => err.user_message(),
            Error::Store(StoreError::Timeout(_)) => {
                "The server took too long to respond. Please try again.".to_string()
            }
            Error::Store(StoreError::PartialFailure { failed_ids }) => {
                format!("{} item(s) could not be deleted.", failed_ids.len())
            }
            Error::Store(_) => "Could not reach your planner data. Please try again.".to_string(),
            Error::Validation(err) => err.to_string(),
            Error::NotSignedIn | Error::IdentityMismatch { .. } => {
                "Please sign in again.".to_string()
            }
            other => other.to_string(),
        }
    }
}

/// Errors raised by the authentication backend.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Unknown email or wrong password.
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// An account already exists for this email.
    #[error("Email address is already in use")]
    EmailAlreadyInUse,

    /// The backend rejected the email format.
    #[error("Invalid email address")]
    InvalidEmail,

    /// The backend rejected the password as too weak.
    #[error("Password is too weak: {0}")]
    WeakPassword(String),

    /// Input rejected before contacting the backend.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The backend could not be reached.
    #[error("Network error: {0}")]
    Network(String),

    /// The backend did not answer within the remote timeout.
    #[error("Authentication request timed out")]
    Timeout,

    /// Any other backend-reported failure.
    #[error("Authentication provider error: {0}")]
    Provider(String),
}

impl AuthError {
    /// Displayable message for sign-in and sign-up screens.
    pub fn user_message(&self) -> String {
        match self {
            AuthError::Network(_) | AuthError::Timeout => {
                "Could not reach the sign-in service. Check your connection.".to_string()
            }
            AuthError::Provider(_) => "Something went wrong. Please try again.".to_string(),
            other => other.to_string(),
        }
    }
}

/// Errors raised by the remote document store.
///
/// All details are plain strings so backends can convert their own errors
/// into this type.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The document does not exist (only raised by field updates and
    /// single-document reads that require presence).
    #[error("Document not found: {0}")]
    NotFound(String),

    #[error("Read failed: {0}")]
    ReadFailed(String),

    #[error("Write failed: {0}")]
    WriteFailed(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    /// A write batch was rejected; none of its writes were applied.
    #[error("Batch commit failed: {0}")]
    BatchFailed(String),

    /// A stored document could not be decoded into the expected model.
    #[error("Malformed document {path}: {message}")]
    MalformedDocument { path: String, message: String },

    /// The operation did not complete within the remote timeout.
    #[error("Operation timed out: {0}")]
    Timeout(String),

    /// Some of several independent writes failed.
    #[error("{} of the requested writes failed", .failed_ids.len())]
    PartialFailure { failed_ids: Vec<String> },

    /// The store is not usable (credentials missing, lock poisoned, ...).
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Validation errors for user input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} must not be empty")]
    EmptyField(String),

    #[error("Invalid identifier '{0}'")]
    InvalidId(String),
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::MalformedDocument {
            path: String::new(),
            message: err.to_string(),
        }
    }
}
