//! Planorama Firebase Crate
//!
//! Remote backends for the planner: email/password accounts through the
//! identity toolkit REST API and document storage through the document
//! database REST API.
//!
//! # Overview
//!
//! - [`FirebaseAuthClient`] - [`AuthProvider`](planorama_core::session::AuthProvider)
//!   that keeps the signed-in user's ID token and refreshes it before expiry
//! - [`FirestoreClient`] - [`DocumentStore`](planorama_core::store::DocumentStore)
//!   authorized with that token
//! - [`connect`] - wires both into a [`PlannerContext`]

mod auth;
mod client;
mod error;
mod firestore;
mod types;
mod value;

use std::sync::Arc;

use log::info;
use planorama_core::{PlannerContext, PlanoramaConfig};
use planorama_weather::OpenMeteoProvider;

pub use auth::{FirebaseAuthClient, TokenSource};
pub use error::{FirebaseError, Result};
pub use firestore::FirestoreClient;
pub use value::{decode_fields, decode_value, encode_fields, encode_value};

/// Builds a planner context backed by Firebase.
///
/// Fails with [`planorama_core::Error::MissingConfigKey`] when the API key or
/// project id is not configured.
pub fn connect(config: PlanoramaConfig) -> planorama_core::Result<PlannerContext> {
    let settings = config.require_firebase()?;
    info!("Connecting to Firebase project {}", settings.project_id);

    let auth = Arc::new(
        FirebaseAuthClient::new(&settings.api_key, &config.auth_base_url)
            .with_token_url(&config.token_base_url),
    );
    let store = Arc::new(
        FirestoreClient::new(&settings.project_id, &config.firestore_base_url)
            .with_token_source(auth.clone()),
    );
    let weather = Arc::new(OpenMeteoProvider::with_base_url(&config.weather_base_url));

    Ok(PlannerContext::new(config, auth, store, weather))
}
