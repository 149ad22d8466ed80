//! Planorama Weather Crate
//!
//! Fetches current conditions for an event location and converts them to the
//! imperial units shown by the planner.
//!
//! # Overview
//!
//! - [`WeatherProvider`] - provider-agnostic trait for "current conditions" lookups
//! - [`OpenMeteoProvider`] - implementation backed by the Open-Meteo forecast API
//! - [`CurrentConditions`] - temperature (°F), wind (mph) and precipitation (in)
//! - [`convert`] - the metric to imperial conversions used by every provider
//!
//! Lookups are stateless: there is no caching, no retry and no cancellation.
//! A failed lookup surfaces as a [`FetchError`]; callers decide how to render it.

pub mod convert;
pub mod errors;
pub mod models;
pub mod provider;

pub use errors::FetchError;
pub use models::{Coordinates, CurrentConditions, RawCurrentWeather};
pub use provider::open_meteo::OpenMeteoProvider;
pub use provider::WeatherProvider;
