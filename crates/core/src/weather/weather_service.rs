use async_trait::async_trait;
use log::{debug, error};
use planorama_weather::{Coordinates, CurrentConditions, FetchError, WeatherProvider};
use std::sync::Arc;
use std::time::Duration;

use super::weather_model::WeatherDisplay;
use crate::errors::Result;

/// Trait for weather lookup operations
#[async_trait]
pub trait WeatherServiceTrait: Send + Sync {
    /// One lookup at `coordinates`; no retry and no caching.
    async fn fetch_current(&self, coordinates: Coordinates) -> Result<CurrentConditions>;

    /// Conditions at the configured location, or placeholders if the lookup
    /// failed.
    async fn current_display(&self) -> WeatherDisplay;
}

pub struct WeatherService {
    provider: Arc<dyn WeatherProvider>,
    location: Coordinates,
    timeout: Duration,
}

impl WeatherService {
    pub fn new(provider: Arc<dyn WeatherProvider>, location: Coordinates, timeout: Duration) -> Self {
        Self {
            provider,
            location,
            timeout,
        }
    }

    pub fn location(&self) -> Coordinates {
        self.location
    }
}

#[async_trait]
impl WeatherServiceTrait for WeatherService {
    async fn fetch_current(&self, coordinates: Coordinates) -> Result<CurrentConditions> {
        debug!(
            "Fetching weather from {} at {},{}",
            self.provider.id(),
            coordinates.latitude,
            coordinates.longitude
        );
        let conditions =
            match tokio::time::timeout(self.timeout, self.provider.fetch_current(coordinates)).await
            {
                Ok(result) => result?,
                Err(_) => {
                    return Err(FetchError::Timeout {
                        provider: self.provider.id().to_string(),
                    }
                    .into())
                }
            };
        Ok(conditions)
    }

    async fn current_display(&self) -> WeatherDisplay {
        match self.fetch_current(self.location).await {
            Ok(conditions) => WeatherDisplay::from_conditions(&conditions),
            Err(e) => {
                error!("Weather lookup failed: {}", e);
                WeatherDisplay::placeholder()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::Error;
    use planorama_weather::RawCurrentWeather;

    // --- Mocks ---

    struct FixedProvider;

    #[async_trait]
    impl WeatherProvider for FixedProvider {
        fn id(&self) -> &'static str {
            "FIXED"
        }

        async fn fetch_current(
            &self,
            _coordinates: Coordinates,
        ) -> std::result::Result<CurrentConditions, FetchError> {
            Ok(CurrentConditions::from(RawCurrentWeather {
                temperature: 0.0,
                windspeed: 10.0,
                precipitation: Some(1.0),
            }))
        }
    }

    struct DownProvider;

    #[async_trait]
    impl WeatherProvider for DownProvider {
        fn id(&self) -> &'static str {
            "DOWN"
        }

        async fn fetch_current(
            &self,
            _coordinates: Coordinates,
        ) -> std::result::Result<CurrentConditions, FetchError> {
            Err(FetchError::Status {
                provider: "DOWN".to_string(),
                status: 503,
            })
        }
    }

    struct HangingProvider;

    #[async_trait]
    impl WeatherProvider for HangingProvider {
        fn id(&self) -> &'static str {
            "HANGING"
        }

        async fn fetch_current(
            &self,
            _coordinates: Coordinates,
        ) -> std::result::Result<CurrentConditions, FetchError> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Err(FetchError::decode("HANGING", "never"))
        }
    }

    fn service(provider: Arc<dyn WeatherProvider>) -> WeatherService {
        WeatherService::new(
            provider,
            Coordinates::new(40.7128, -74.006),
            Duration::from_secs(15),
        )
    }

    // --- Tests ---

    #[tokio::test]
    async fn test_display_of_reference_conditions() {
        let display = service(Arc::new(FixedProvider)).current_display().await;
        assert_eq!(display.temperature, "32.0°F");
        assert_eq!(display.wind, "6.21 mph");
        assert_eq!(display.precipitation, "0.04 in");
    }

    #[tokio::test]
    async fn test_failure_falls_back_to_placeholder() {
        let weather = service(Arc::new(DownProvider));
        let err = weather
            .fetch_current(weather.location())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Weather(FetchError::Status { status: 503, .. })
        ));
        assert_eq!(weather.current_display().await, WeatherDisplay::placeholder());
    }

    #[tokio::test(start_paused = true)]
    async fn test_hanging_provider_times_out() {
        let weather = service(Arc::new(HangingProvider));
        let err = weather
            .fetch_current(weather.location())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Weather(FetchError::Timeout { .. })));
    }
}
