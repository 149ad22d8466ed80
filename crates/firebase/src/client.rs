//! HTTP plumbing shared by the auth and document clients.

use log::debug;
use reqwest::Client;
use std::time::Duration;

use crate::error::{FirebaseError, Result};
use crate::types::ApiErrorResponse;

/// Default timeout for API requests.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub(crate) fn http_client() -> Client {
    Client::builder()
        .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
        .build()
        .unwrap_or_else(|_| Client::new())
}

/// Builds the error for a non-success response body.
pub(crate) fn api_error(status: u16, body: &str) -> FirebaseError {
    match serde_json::from_str::<ApiErrorResponse>(body) {
        Ok(error) => FirebaseError::api(status, error.error.message),
        Err(_) => FirebaseError::api(status, format!("Request failed: {}", body)),
    }
}

/// Reads the body, failing with [`FirebaseError::Api`] on non-success.
pub(crate) async fn response_text(response: reqwest::Response) -> Result<String> {
    let status = response.status();
    let body = response.text().await?;
    debug!("API response ({})", status);

    if !status.is_success() {
        return Err(api_error(status.as_u16(), &body));
    }
    Ok(body)
}

/// Parse a JSON response body.
pub(crate) async fn parse_response<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T> {
    let body = response_text(response).await?;
    serde_json::from_str(&body).map_err(|e| {
        log::error!("Failed to deserialize response: {}", e);
        FirebaseError::from(e)
    })
}
