use async_trait::async_trait;
use log::{debug, error};
use std::future::Future;
use std::sync::{Arc, PoisonError, RwLock, Weak};
use std::time::Duration;
use tokio::sync::watch;

use super::session_cache::SessionScoped;
use super::session_model::{Identity, SignUpDetails, UserProfile};
use super::session_traits::{AuthProvider, SessionServiceTrait};
use crate::errors::{AuthError, AuthResult, Error, Result};
use crate::store::{paths, to_fields, DocumentStore};

/// Owns the signed-in identity and tears down session data when it changes.
pub struct SessionService {
    auth: Arc<dyn AuthProvider>,
    store: Arc<dyn DocumentStore>,
    identity: watch::Sender<Option<Identity>>,
    scoped: RwLock<Vec<Weak<dyn SessionScoped>>>,
    timeout: Duration,
}

impl SessionService {
    pub fn new(
        auth: Arc<dyn AuthProvider>,
        store: Arc<dyn DocumentStore>,
        timeout: Duration,
    ) -> Self {
        let (identity, _) = watch::channel(None);
        Self {
            auth,
            store,
            identity,
            scoped: RwLock::new(Vec::new()),
            timeout,
        }
    }

    async fn bounded<T>(&self, call: impl Future<Output = AuthResult<T>>) -> AuthResult<T> {
        tokio::time::timeout(self.timeout, call)
            .await
            .unwrap_or(Err(AuthError::Timeout))
    }

    fn teardown(&self) {
        let live: Vec<Arc<dyn SessionScoped>> = {
            let mut scoped = self.scoped.write().unwrap_or_else(PoisonError::into_inner);
            scoped.retain(|weak| weak.strong_count() > 0);
            scoped.iter().filter_map(Weak::upgrade).collect()
        };
        debug!("Clearing {} session caches", live.len());
        for cache in live {
            cache.clear_session_data();
        }
    }

    /// Publishes `identity`, clearing session data first if the uid changes.
    fn set_identity(&self, identity: Option<Identity>) {
        let current_uid = self.identity.borrow().as_ref().map(|i| i.uid.clone());
        let next_uid = identity.as_ref().map(|i| i.uid.clone());
        if current_uid != next_uid {
            self.teardown();
        }
        self.identity.send_replace(identity);
    }

    async fn write_profile(&self, uid: &str, profile: &UserProfile) -> Result<()> {
        let fields = to_fields(profile)?;
        self.store.set(&paths::user_doc(uid), fields).await?;
        Ok(())
    }
}

fn validate_credentials(email: &str, password: &str) -> AuthResult<()> {
    if email.trim().is_empty() {
        return Err(AuthError::InvalidInput("Email must not be empty".to_string()));
    }
    if password.trim().is_empty() {
        return Err(AuthError::InvalidInput(
            "Password must not be empty".to_string(),
        ));
    }
    Ok(())
}

#[async_trait]
impl SessionServiceTrait for SessionService {
    fn current_identity(&self) -> Option<Identity> {
        self.identity.borrow().clone()
    }

    fn is_signed_in(&self) -> bool {
        self.identity.borrow().is_some()
    }

    fn subscribe(&self) -> watch::Receiver<Option<Identity>> {
        self.identity.subscribe()
    }

    fn register_scoped(&self, scoped: Arc<dyn SessionScoped>) {
        self.scoped
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Arc::downgrade(&scoped));
    }

    async fn sign_up(&self, details: SignUpDetails) -> Result<()> {
        validate_credentials(&details.email, &details.password)?;
        let identity = self
            .bounded(
                self.auth
                    .create_user(details.email.trim(), &details.password),
            )
            .await?;
        debug!("Signed up {}", identity.uid);
        self.set_identity(Some(identity.clone()));

        // The account exists at this point; a missing profile is repaired
        // with `save_profile`.
        if let Err(e) = self.write_profile(&identity.uid, &details.profile()).await {
            error!("Failed to write profile for {}: {}", identity.uid, e);
        }
        Ok(())
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<()> {
        validate_credentials(email, password)?;
        let identity = self
            .bounded(self.auth.sign_in(email.trim(), password))
            .await?;
        debug!("Signed in {}", identity.uid);
        self.set_identity(Some(identity));
        Ok(())
    }

    async fn sign_out(&self) -> Result<()> {
        if let Err(e) = self.bounded(self.auth.sign_out()).await {
            error!("Remote sign-out failed: {}", e);
        }
        self.teardown();
        self.identity.send_replace(None);
        Ok(())
    }

    async fn save_profile(&self, profile: &UserProfile) -> Result<()> {
        let identity = self.require_identity()?;
        self.write_profile(&identity.uid, profile).await
    }

    fn require_identity(&self) -> Result<Identity> {
        self.current_identity().ok_or(Error::NotSignedIn)
    }

    fn require_scope(&self, identity_id: &str) -> Result<Identity> {
        let identity = self.require_identity()?;
        if identity.uid != identity_id {
            return Err(Error::IdentityMismatch {
                requested: identity_id.to_string(),
            });
        }
        Ok(identity)
    }
}
