use async_trait::async_trait;
use log::debug;
use std::collections::HashMap;
use std::sync::RwLock;
use uuid::Uuid;

use super::session_model::Identity;
use super::session_traits::AuthProvider;
use crate::constants::MIN_PASSWORD_LENGTH;
use crate::errors::{AuthError, AuthResult};

#[derive(Debug, Clone)]
struct Account {
    identity: Identity,
    password: String,
}

/// Email/password accounts held in memory, with the same validation rules
/// as the hosted identity service.
#[derive(Debug, Default)]
pub struct InMemoryAuthProvider {
    accounts: RwLock<HashMap<String, Account>>,
}

impl InMemoryAuthProvider {
    pub fn new() -> Self {
        Self::default()
    }
}

fn account_key(email: &str) -> String {
    email.trim().to_lowercase()
}

fn poisoned<T>(_: T) -> AuthError {
    AuthError::Provider("account table lock poisoned".to_string())
}

#[async_trait]
impl AuthProvider for InMemoryAuthProvider {
    async fn create_user(&self, email: &str, password: &str) -> AuthResult<Identity> {
        if !email.contains('@') {
            return Err(AuthError::InvalidEmail);
        }
        if password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(AuthError::WeakPassword(format!(
                "Password should be at least {} characters",
                MIN_PASSWORD_LENGTH
            )));
        }

        let mut accounts = self.accounts.write().map_err(poisoned)?;
        let key = account_key(email);
        if accounts.contains_key(&key) {
            return Err(AuthError::EmailAlreadyInUse);
        }

        let identity = Identity {
            uid: Uuid::new_v4().to_string(),
            email: email.trim().to_string(),
        };
        accounts.insert(
            key,
            Account {
                identity: identity.clone(),
                password: password.to_string(),
            },
        );
        debug!("Created account {}", identity.uid);
        Ok(identity)
    }

    async fn sign_in(&self, email: &str, password: &str) -> AuthResult<Identity> {
        let accounts = self.accounts.read().map_err(poisoned)?;
        match accounts.get(&account_key(email)) {
            Some(account) if account.password == password => Ok(account.identity.clone()),
            _ => Err(AuthError::InvalidCredentials),
        }
    }

    async fn sign_out(&self) -> AuthResult<()> {
        Ok(())
    }
}
