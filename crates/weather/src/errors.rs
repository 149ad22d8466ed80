//! Error types for weather lookups.

use thiserror::Error;

/// Errors that can occur while fetching current conditions.
///
/// None of these are retried: a weather lookup is fire-and-forget and the
/// caller falls back to placeholder values.
#[derive(Error, Debug)]
pub enum FetchError {
    /// The request could not be sent or the connection failed.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The provider answered with a non-success HTTP status.
    #[error("Provider {provider} returned HTTP {status}")]
    Status {
        /// The provider that returned the status
        provider: String,
        /// The HTTP status code
        status: u16,
    },

    /// The response body was not the expected JSON shape.
    #[error("Invalid response from {provider}: {message}")]
    Decode {
        /// The provider whose payload failed to decode
        provider: String,
        /// The decoding error message
        message: String,
    },

    /// The request did not complete within the configured timeout.
    #[error("Timeout: {provider}")]
    Timeout {
        /// The provider that timed out
        provider: String,
    },
}

impl FetchError {
    /// Create a decode error for the given provider.
    pub fn decode(provider: &str, message: impl Into<String>) -> Self {
        Self::Decode {
            provider: provider.to_string(),
            message: message.into(),
        }
    }
}
