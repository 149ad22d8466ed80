//! Runtime configuration read from `PLANORAMA_*` environment variables.

use planorama_weather::Coordinates;
use std::str::FromStr;
use std::time::Duration;

use crate::constants::{
    DEFAULT_REMOTE_TIMEOUT_SECS, DEFAULT_WEATHER_LATITUDE, DEFAULT_WEATHER_LONGITUDE,
};
use crate::errors::{Error, Result};

pub const ENV_FIREBASE_API_KEY: &str = "PLANORAMA_FIREBASE_API_KEY";
pub const ENV_FIREBASE_PROJECT_ID: &str = "PLANORAMA_FIREBASE_PROJECT_ID";
pub const ENV_AUTH_URL: &str = "PLANORAMA_AUTH_URL";
pub const ENV_TOKEN_URL: &str = "PLANORAMA_TOKEN_URL";
pub const ENV_FIRESTORE_URL: &str = "PLANORAMA_FIRESTORE_URL";
pub const ENV_WEATHER_URL: &str = "PLANORAMA_WEATHER_URL";
pub const ENV_WEATHER_LATITUDE: &str = "PLANORAMA_WEATHER_LATITUDE";
pub const ENV_WEATHER_LONGITUDE: &str = "PLANORAMA_WEATHER_LONGITUDE";
pub const ENV_REMOTE_TIMEOUT_SECS: &str = "PLANORAMA_REMOTE_TIMEOUT_SECS";

pub const DEFAULT_AUTH_URL: &str = "https://identitytoolkit.googleapis.com";
pub const DEFAULT_TOKEN_URL: &str = "https://securetoken.googleapis.com";
pub const DEFAULT_FIRESTORE_URL: &str = "https://firestore.googleapis.com";
pub const DEFAULT_WEATHER_URL: &str = "https://api.open-meteo.com";

#[derive(Debug, Clone, PartialEq)]
pub struct PlanoramaConfig {
    pub firebase_api_key: Option<String>,
    pub firebase_project_id: Option<String>,
    pub auth_base_url: String,
    /// Exchanges refresh tokens for new ID tokens.
    pub token_base_url: String,
    pub firestore_base_url: String,
    pub weather_base_url: String,
    /// Where the home screen weather is looked up.
    pub weather_location: Coordinates,
    /// Upper bound for every auth and store call.
    pub remote_timeout: Duration,
}

/// Firebase settings that must be present to build the hosted backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FirebaseSettings {
    pub api_key: String,
    pub project_id: String,
}

impl Default for PlanoramaConfig {
    fn default() -> Self {
        Self {
            firebase_api_key: None,
            firebase_project_id: None,
            auth_base_url: DEFAULT_AUTH_URL.to_string(),
            token_base_url: DEFAULT_TOKEN_URL.to_string(),
            firestore_base_url: DEFAULT_FIRESTORE_URL.to_string(),
            weather_base_url: DEFAULT_WEATHER_URL.to_string(),
            weather_location: Coordinates::new(DEFAULT_WEATHER_LATITUDE, DEFAULT_WEATHER_LONGITUDE),
            remote_timeout: Duration::from_secs(DEFAULT_REMOTE_TIMEOUT_SECS),
        }
    }
}

impl PlanoramaConfig {
    /// Reads the process environment, after loading a `.env` file if present.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from `lookup`; unset or blank keys take
    /// their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let defaults = Self::default();

        let latitude = parse_or(
            get(ENV_WEATHER_LATITUDE),
            ENV_WEATHER_LATITUDE,
            DEFAULT_WEATHER_LATITUDE,
        )?;
        let longitude = parse_or(
            get(ENV_WEATHER_LONGITUDE),
            ENV_WEATHER_LONGITUDE,
            DEFAULT_WEATHER_LONGITUDE,
        )?;
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(Error::InvalidConfigValue(format!(
                "{}={} is outside -90..90",
                ENV_WEATHER_LATITUDE, latitude
            )));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(Error::InvalidConfigValue(format!(
                "{}={} is outside -180..180",
                ENV_WEATHER_LONGITUDE, longitude
            )));
        }

        let timeout_secs: u64 = parse_or(
            get(ENV_REMOTE_TIMEOUT_SECS),
            ENV_REMOTE_TIMEOUT_SECS,
            DEFAULT_REMOTE_TIMEOUT_SECS,
        )?;
        if timeout_secs == 0 {
            return Err(Error::InvalidConfigValue(format!(
                "{} must be greater than zero",
                ENV_REMOTE_TIMEOUT_SECS
            )));
        }

        Ok(Self {
            firebase_api_key: get(ENV_FIREBASE_API_KEY),
            firebase_project_id: get(ENV_FIREBASE_PROJECT_ID),
            auth_base_url: get(ENV_AUTH_URL).unwrap_or(defaults.auth_base_url),
            token_base_url: get(ENV_TOKEN_URL).unwrap_or(defaults.token_base_url),
            firestore_base_url: get(ENV_FIRESTORE_URL).unwrap_or(defaults.firestore_base_url),
            weather_base_url: get(ENV_WEATHER_URL).unwrap_or(defaults.weather_base_url),
            weather_location: Coordinates::new(latitude, longitude),
            remote_timeout: Duration::from_secs(timeout_secs),
        })
    }

    /// The Firebase key and project, or the first missing variable.
    pub fn require_firebase(&self) -> Result<FirebaseSettings> {
        let api_key = self
            .firebase_api_key
            .clone()
            .ok_or_else(|| Error::MissingConfigKey(ENV_FIREBASE_API_KEY.to_string()))?;
        let project_id = self
            .firebase_project_id
            .clone()
            .ok_or_else(|| Error::MissingConfigKey(ENV_FIREBASE_PROJECT_ID.to_string()))?;
        Ok(FirebaseSettings {
            api_key,
            project_id,
        })
    }
}

fn parse_or<T: FromStr>(value: Option<String>, key: &str, default: T) -> Result<T> {
    match value {
        None => Ok(default),
        Some(raw) => raw
            .parse()
            .map_err(|_| Error::InvalidConfigValue(format!("{}={}", key, raw))),
    }
}
