//! Planorama Core - session, events, guests, checklists and weather facades.
//!
//! This crate holds the planner's data-access and synchronization layer. It
//! is backend-agnostic: remote storage and authentication are reached through
//! the [`store::DocumentStore`] and [`session::AuthProvider`] traits, which
//! the `planorama-firebase` crate implements against the hosted services.
//! In-memory implementations of both live here for offline runs and tests.

pub mod checklists;
pub mod config;
pub mod constants;
pub mod context;
pub mod errors;
pub mod events;
pub mod guests;
pub mod session;
pub mod store;
pub mod weather;

pub use config::PlanoramaConfig;
pub use context::PlannerContext;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
