//! Weather data types.

use serde::{Deserialize, Serialize};

use crate::convert::{celsius_to_fahrenheit, kmh_to_mph, mm_to_inches};

/// A point on the globe, in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Current conditions as reported by the provider, in metric units.
///
/// `precipitation` is optional in provider payloads and treated as zero
/// when absent.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawCurrentWeather {
    /// Air temperature in °C
    pub temperature: f64,
    /// Wind speed in km/h
    pub windspeed: f64,
    /// Precipitation in mm
    #[serde(default)]
    pub precipitation: Option<f64>,
}

/// Current conditions converted for display.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentConditions {
    pub temperature_f: f64,
    pub wind_mph: f64,
    pub precipitation_in: f64,
}

impl From<RawCurrentWeather> for CurrentConditions {
    fn from(raw: RawCurrentWeather) -> Self {
        Self {
            temperature_f: celsius_to_fahrenheit(raw.temperature),
            wind_mph: kmh_to_mph(raw.windspeed),
            precipitation_in: mm_to_inches(raw.precipitation.unwrap_or(0.0)),
        }
    }
}
