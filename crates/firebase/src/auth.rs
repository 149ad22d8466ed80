//! Email/password authentication through the identity toolkit REST API.

use async_trait::async_trait;
use log::{debug, warn};
use planorama_core::config::DEFAULT_TOKEN_URL;
use planorama_core::errors::AuthResult;
use planorama_core::session::{AuthProvider, Identity};
use std::sync::{PoisonError, RwLock};
use std::time::{Duration, Instant};

use crate::client::{http_client, parse_response};
use crate::error::Result;
use crate::types::{PasswordRequest, PasswordResponse, RefreshRequest, RefreshResponse};

/// Lifetime assumed when the service does not report one.
const DEFAULT_TOKEN_LIFETIME_SECS: u64 = 3600;

/// Tokens this close to expiry are refreshed before use.
const REFRESH_MARGIN: Duration = Duration::from_secs(60);

/// Source of the bearer token attached to document requests.
#[async_trait]
pub trait TokenSource: Send + Sync {
    /// A usable ID token of the signed-in user, if any.
    async fn id_token(&self) -> Option<String>;
}

#[derive(Debug, Clone)]
struct Tokens {
    id_token: String,
    refresh_token: Option<String>,
    expires_at: Instant,
}

impl Tokens {
    fn new(id_token: String, refresh_token: Option<String>, expires_in: Option<&str>) -> Self {
        let lifetime = expires_in
            .and_then(|secs| secs.trim().parse().ok())
            .unwrap_or(DEFAULT_TOKEN_LIFETIME_SECS);
        Self {
            id_token,
            refresh_token,
            expires_at: Instant::now() + Duration::from_secs(lifetime),
        }
    }

    fn needs_refresh(&self, now: Instant) -> bool {
        now + REFRESH_MARGIN >= self.expires_at
    }
}

/// Identity toolkit client. Keeps the tokens of the signed-in user so the
/// document client can authorize its requests.
#[derive(Debug)]
pub struct FirebaseAuthClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    token_url: String,
    tokens: RwLock<Option<Tokens>>,
}

impl FirebaseAuthClient {
    /// * `base_url` - e.g. "https://identitytoolkit.googleapis.com"
    pub fn new(api_key: &str, base_url: &str) -> Self {
        Self {
            client: http_client(),
            api_key: api_key.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
            token_url: DEFAULT_TOKEN_URL.to_string(),
            tokens: RwLock::new(None),
        }
    }

    /// Overrides the secure token endpoint, e.g. for the local emulator.
    pub fn with_token_url(mut self, token_url: &str) -> Self {
        self.token_url = token_url.trim_end_matches('/').to_string();
        self
    }

    fn endpoint(&self, method: &str) -> String {
        format!(
            "{}/v1/accounts:{}?key={}",
            self.base_url,
            method,
            urlencoding::encode(&self.api_key)
        )
    }

    fn refresh_endpoint(&self) -> String {
        format!(
            "{}/v1/token?key={}",
            self.token_url,
            urlencoding::encode(&self.api_key)
        )
    }

    async fn password_call(&self, method: &str, email: &str, password: &str) -> Result<Identity> {
        let url = self.endpoint(method);
        debug!("Identity toolkit {} for {}", method, email);

        let response = self
            .client
            .post(&url)
            .json(&PasswordRequest {
                email,
                password,
                return_secure_token: true,
            })
            .send()
            .await?;
        let body: PasswordResponse = parse_response(response).await?;

        self.store_tokens(Some(Tokens::new(
            body.id_token,
            body.refresh_token,
            body.expires_in.as_deref(),
        )));
        Ok(Identity {
            uid: body.local_id,
            email: body.email.unwrap_or_else(|| email.to_string()),
        })
    }

    /// Exchanges `refresh_token` for a new ID token and keeps it, unless the
    /// user signed out or in again meanwhile.
    async fn refresh(&self, refresh_token: &str) -> Result<String> {
        let response = self
            .client
            .post(self.refresh_endpoint())
            .json(&RefreshRequest {
                grant_type: "refresh_token",
                refresh_token,
            })
            .send()
            .await?;
        let body: RefreshResponse = parse_response(response).await?;
        debug!("ID token refreshed");

        let id_token = body.id_token.clone();
        let mut tokens = self.tokens.write().unwrap_or_else(PoisonError::into_inner);
        let current = tokens
            .as_ref()
            .and_then(|tokens| tokens.refresh_token.as_deref());
        if current == Some(refresh_token) {
            *tokens = Some(Tokens::new(
                body.id_token,
                Some(body.refresh_token),
                body.expires_in.as_deref(),
            ));
        }
        Ok(id_token)
    }

    fn current_tokens(&self) -> Option<Tokens> {
        self.tokens
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn store_tokens(&self, tokens: Option<Tokens>) {
        *self.tokens.write().unwrap_or_else(PoisonError::into_inner) = tokens;
    }
}

#[async_trait]
impl TokenSource for FirebaseAuthClient {
    /// Refreshes the ID token when it is about to expire. A failed refresh
    /// hands out the old token; the service then rejects the request.
    async fn id_token(&self) -> Option<String> {
        let tokens = self.current_tokens()?;
        if !tokens.needs_refresh(Instant::now()) {
            return Some(tokens.id_token);
        }
        let Some(refresh_token) = tokens.refresh_token.as_deref() else {
            return Some(tokens.id_token);
        };
        match self.refresh(refresh_token).await {
            Ok(id_token) => Some(id_token),
            Err(e) => {
                warn!("Failed to refresh ID token: {}", e);
                Some(tokens.id_token)
            }
        }
    }
}

#[async_trait]
impl AuthProvider for FirebaseAuthClient {
    /// POST /v1/accounts:signUp
    async fn create_user(&self, email: &str, password: &str) -> AuthResult<Identity> {
        Ok(self.password_call("signUp", email, password).await?)
    }

    /// POST /v1/accounts:signInWithPassword
    async fn sign_in(&self, email: &str, password: &str) -> AuthResult<Identity> {
        Ok(self
            .password_call("signInWithPassword", email, password)
            .await?)
    }

    /// Password sessions are stateless on the server; dropping the tokens
    /// signs the client out.
    async fn sign_out(&self) -> AuthResult<()> {
        self.store_tokens(None);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> FirebaseAuthClient {
        // Nothing listens on port 9; refresh attempts fail fast.
        FirebaseAuthClient::new("key 1", "https://identitytoolkit.googleapis.com/")
            .with_token_url("http://127.0.0.1:9/")
    }

    #[test]
    fn test_endpoint_urls() {
        let client = client();
        assert_eq!(
            client.endpoint("signUp"),
            "https://identitytoolkit.googleapis.com/v1/accounts:signUp?key=key%201"
        );
        assert_eq!(
            client.refresh_endpoint(),
            "http://127.0.0.1:9/v1/token?key=key%201"
        );
    }

    #[test]
    fn test_token_lifetime() {
        let now = Instant::now();
        let fresh = Tokens::new("id".to_string(), None, Some("3600"));
        assert!(!fresh.needs_refresh(now));

        let short = Tokens::new("id".to_string(), None, Some("30"));
        assert!(short.needs_refresh(now));

        let unreported = Tokens::new("id".to_string(), None, None);
        assert!(!unreported.needs_refresh(now));
        assert!(unreported.needs_refresh(now + Duration::from_secs(DEFAULT_TOKEN_LIFETIME_SECS)));
    }

    #[tokio::test]
    async fn test_fresh_token_is_used_as_is() {
        let client = client();
        client.store_tokens(Some(Tokens::new(
            "fresh".to_string(),
            Some("refresh".to_string()),
            Some("3600"),
        )));
        assert_eq!(client.id_token().await.as_deref(), Some("fresh"));
    }

    #[tokio::test]
    async fn test_expiring_token_is_refreshed() {
        let client = client();
        client.store_tokens(Some(Tokens::new(
            "stale".to_string(),
            Some("refresh".to_string()),
            Some("0"),
        )));

        // The refresh call cannot reach the token endpoint, so the old token
        // is handed out and kept for the next attempt.
        assert_eq!(client.id_token().await.as_deref(), Some("stale"));
        let kept = client.current_tokens().unwrap();
        assert_eq!(kept.refresh_token.as_deref(), Some("refresh"));
    }

    #[tokio::test]
    async fn test_sign_out_drops_tokens() {
        let client = client();
        client.store_tokens(Some(Tokens::new("token".to_string(), None, None)));
        assert_eq!(client.id_token().await.as_deref(), Some("token"));

        client.sign_out().await.unwrap();
        assert!(client.id_token().await.is_none());
    }

    #[test]
    fn test_refresh_request_shape() {
        let body = serde_json::to_value(RefreshRequest {
            grant_type: "refresh_token",
            refresh_token: "r1",
        })
        .unwrap();
        assert_eq!(
            body,
            serde_json::json!({ "grant_type": "refresh_token", "refresh_token": "r1" })
        );

        let response: RefreshResponse = serde_json::from_str(
            r#"{"id_token": "i2", "refresh_token": "r2", "expires_in": "3600", "user_id": "u1"}"#,
        )
        .unwrap();
        assert_eq!(response.id_token, "i2");
        assert_eq!(response.expires_in.as_deref(), Some("3600"));
    }

    #[test]
    fn test_password_request_shape() {
        let body = serde_json::to_value(PasswordRequest {
            email: "ada@example.com",
            password: "secret1",
            return_secure_token: true,
        })
        .unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "email": "ada@example.com",
                "password": "secret1",
                "returnSecureToken": true
            })
        );
    }
}
