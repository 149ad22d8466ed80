//! Weather module - current conditions for the home screen.

mod weather_model;
mod weather_service;

pub use weather_model::WeatherDisplay;
pub use weather_service::{WeatherService, WeatherServiceTrait};

pub use planorama_weather::{Coordinates, CurrentConditions, WeatherProvider};
