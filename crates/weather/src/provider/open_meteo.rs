//! Open-Meteo provider for current conditions.
//!
//! Uses the free forecast endpoint with `current_weather=true`, which returns:
//!
//! ```json
//! { "current_weather": { "temperature": 12.3, "windspeed": 8.1, "precipitation": 0.2 } }
//! ```
//!
//! Open-Meteo reports °C, km/h and mm; values are converted on the way out.

use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::errors::FetchError;
use crate::models::{Coordinates, CurrentConditions, RawCurrentWeather};
use crate::provider::WeatherProvider;

/// Provider ID constant
const PROVIDER_ID: &str = "OPEN_METEO";

/// Public Open-Meteo API host
pub const DEFAULT_BASE_URL: &str = "https://api.open-meteo.com";

/// Default HTTP request timeout
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    current_weather: RawCurrentWeather,
}

/// Open-Meteo current-conditions provider.
pub struct OpenMeteoProvider {
    client: Client,
    base_url: String,
}

impl OpenMeteoProvider {
    /// Create a provider against the public Open-Meteo API.
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Create a provider against a custom host (mirrors, test servers).
    pub fn with_base_url(base_url: &str) -> Self {
        Self::with_timeout(base_url, REQUEST_TIMEOUT)
    }

    /// Create a provider with an explicit request timeout.
    pub fn with_timeout(base_url: &str, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Builds the forecast URL for the given location.
    fn forecast_url(&self, coordinates: Coordinates) -> String {
        format!(
            "{}/v1/forecast?latitude={}&longitude={}&current_weather=true",
            self.base_url, coordinates.latitude, coordinates.longitude
        )
    }

    /// Parses a forecast payload into converted conditions.
    pub fn parse_forecast(body: &str) -> Result<CurrentConditions, FetchError> {
        let response: ForecastResponse =
            serde_json::from_str(body).map_err(|e| FetchError::decode(PROVIDER_ID, e.to_string()))?;
        Ok(CurrentConditions::from(response.current_weather))
    }
}

impl Default for OpenMeteoProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl WeatherProvider for OpenMeteoProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn fetch_current(
        &self,
        coordinates: Coordinates,
    ) -> Result<CurrentConditions, FetchError> {
        let url = self.forecast_url(coordinates);
        debug!("Fetching current weather: {}", url);

        let response = self.client.get(&url).send().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout {
                    provider: PROVIDER_ID.to_string(),
                }
            } else {
                FetchError::Network(e)
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                provider: PROVIDER_ID.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        Self::parse_forecast(&body)
    }
}
