use planorama_weather::CurrentConditions;
use serde::Serialize;

use crate::constants::WEATHER_PLACEHOLDER;

/// Current conditions formatted for the home screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeatherDisplay {
    pub temperature: String,
    pub wind: String,
    pub precipitation: String,
}

impl WeatherDisplay {
    /// Shown while loading and when the lookup failed.
    pub fn placeholder() -> Self {
        Self {
            temperature: WEATHER_PLACEHOLDER.to_string(),
            wind: WEATHER_PLACEHOLDER.to_string(),
            precipitation: WEATHER_PLACEHOLDER.to_string(),
        }
    }

    pub fn from_conditions(conditions: &CurrentConditions) -> Self {
        Self {
            temperature: format!("{:.1}°F", conditions.temperature_f),
            wind: format!("{:.2} mph", conditions.wind_mph),
            precipitation: format!("{:.2} in", conditions.precipitation_in),
        }
    }
}

impl Default for WeatherDisplay {
    fn default() -> Self {
        Self::placeholder()
    }
}

impl From<&CurrentConditions> for WeatherDisplay {
    fn from(conditions: &CurrentConditions) -> Self {
        Self::from_conditions(conditions)
    }
}
