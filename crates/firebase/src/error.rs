//! Error types for the Firebase backend.

use planorama_core::errors::{AuthError, StoreError};
use thiserror::Error;

/// Result type alias for Firebase REST calls.
pub type Result<T> = std::result::Result<T, FirebaseError>;

/// Errors that can occur while talking to the Firebase REST APIs.
#[derive(Debug, Error)]
pub enum FirebaseError {
    /// HTTP client error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Error response from the service; `message` is the service's error
    /// code, optionally followed by ` : details`
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// A payload that does not have the documented shape
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl FirebaseError {
    /// Create an API error from status and message
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Create an invalid response error
    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::InvalidResponse(message.into())
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            FirebaseError::Api { status, .. } => Some(*status),
            FirebaseError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Converts the error for a store operation; `wrap` builds the variant
    /// matching the operation (read, write, delete, batch).
    pub fn into_store_error(self, target: &str, wrap: fn(String) -> StoreError) -> StoreError {
        match self {
            FirebaseError::Http(ref e) if e.is_timeout() => {
                StoreError::Timeout(target.to_string())
            }
            FirebaseError::Json(e) => StoreError::MalformedDocument {
                path: target.to_string(),
                message: e.to_string(),
            },
            FirebaseError::InvalidResponse(message) => StoreError::MalformedDocument {
                path: target.to_string(),
                message,
            },
            FirebaseError::Api { status: 404, .. } => StoreError::NotFound(target.to_string()),
            FirebaseError::Api { status, message } if status == 401 || status == 403 => {
                StoreError::Unavailable(format!("{}: {}", target, message))
            }
            other => wrap(format!("{}: {}", target, other)),
        }
    }
}

/// Splits `"WEAK_PASSWORD : Password should be at least 6 characters"` into
/// its code and detail.
fn split_api_message(message: &str) -> (&str, &str) {
    match message.split_once(':') {
        Some((code, detail)) => (code.trim(), detail.trim()),
        None => (message.trim(), ""),
    }
}

impl From<FirebaseError> for AuthError {
    fn from(err: FirebaseError) -> Self {
        match err {
            FirebaseError::Http(e) if e.is_timeout() => AuthError::Timeout,
            FirebaseError::Http(e) => AuthError::Network(e.to_string()),
            FirebaseError::Api { message, .. } => {
                let (code, detail) = split_api_message(&message);
                match code {
                    "EMAIL_EXISTS" => AuthError::EmailAlreadyInUse,
                    "EMAIL_NOT_FOUND"
                    | "INVALID_PASSWORD"
                    | "INVALID_LOGIN_CREDENTIALS"
                    | "USER_DISABLED" => AuthError::InvalidCredentials,
                    "INVALID_EMAIL" => AuthError::InvalidEmail,
                    "WEAK_PASSWORD" => AuthError::WeakPassword(detail.to_string()),
                    "MISSING_EMAIL" | "MISSING_PASSWORD" => {
                        AuthError::InvalidInput(code.to_string())
                    }
                    _ => AuthError::Provider(message),
                }
            }
            other => AuthError::Provider(other.to_string()),
        }
    }
}
