use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::watch;

use super::session_cache::SessionScoped;
use super::session_model::{Identity, SignUpDetails, UserProfile};
use crate::errors::{AuthResult, Result};

/// Remote credential backend.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    async fn create_user(&self, email: &str, password: &str) -> AuthResult<Identity>;
    async fn sign_in(&self, email: &str, password: &str) -> AuthResult<Identity>;
    async fn sign_out(&self) -> AuthResult<()>;
}

/// Trait for session manager operations
#[async_trait]
pub trait SessionServiceTrait: Send + Sync {
    fn current_identity(&self) -> Option<Identity>;
    fn is_signed_in(&self) -> bool;

    /// Receiver that observes every identity change.
    fn subscribe(&self) -> watch::Receiver<Option<Identity>>;

    /// Registers a cache to be cleared when the session ends or the identity
    /// changes. Only a weak reference is kept.
    fn register_scoped(&self, scoped: Arc<dyn SessionScoped>);

    async fn sign_up(&self, details: SignUpDetails) -> Result<()>;
    async fn sign_in(&self, email: &str, password: &str) -> Result<()>;
    async fn sign_out(&self) -> Result<()>;

    /// Writes the profile of the signed-in identity.
    async fn save_profile(&self, profile: &UserProfile) -> Result<()>;

    fn require_identity(&self) -> Result<Identity>;

    /// Returns the signed-in identity if it is `identity_id`.
    fn require_scope(&self, identity_id: &str) -> Result<Identity>;
}
