//! Weather provider abstractions and implementations.

pub mod open_meteo;

use async_trait::async_trait;

use crate::errors::FetchError;
use crate::models::{Coordinates, CurrentConditions};

/// Trait for current-conditions providers.
///
/// Implementations perform exactly one request per call. They do not retry
/// and do not cache.
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Unique identifier for this provider, used in logs and errors.
    fn id(&self) -> &'static str;

    /// Fetches the current conditions at `coordinates`.
    async fn fetch_current(&self, coordinates: Coordinates)
        -> Result<CurrentConditions, FetchError>;
}
