//! Single outbound HTTP client for the portal backend.
//!
//! Two cross-cutting policies live here:
//! - every authenticated request reads the token store and attaches the
//!   bearer credential (login/registration are the only exempt calls);
//! - an unauthorized (401) response on any authenticated call clears the
//!   token store and publishes a [`SessionExpired`] event on a broadcast
//!   channel. The client never navigates — the application root
//!   subscribes and turns the event into a redirect.
//!
//! All other error statuses pass through to the caller unmodified.

use std::sync::Arc;

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::api::error::ApiError;
use crate::config::PortalConfig;
use crate::models::User;
use crate::token_store::TokenStore;

/// Capacity of the session-expired broadcast channel. Events are tiny
/// and a lagged subscriber only misses duplicate sign-outs.
const EXPIRY_CHANNEL_CAPACITY: usize = 16;

/// Typed event published when an authenticated call came back 401.
#[derive(Debug, Clone)]
pub struct SessionExpired {
    /// Request path that triggered the sign-out, for logging.
    pub path: String,
}

/// Response of `POST /api/auth/login`.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenGrant {
    pub access_token: String,
    pub token_type: String,
}

/// Body of `POST /api/auth/patient/register` (patient self-registration).
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub password: String,
    pub phone: String,
    pub national_id: String,
    pub date_of_birth: String,
    pub gender: String,
    pub emergency_contact: String,
}

/// Response of `POST /api/auth/patient/register`.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterAck {
    pub message: String,
    pub user_id: String,
    pub username: String,
}

#[derive(Serialize)]
struct PasswordChangeRequest<'a> {
    current_password: &'a str,
    new_password: &'a str,
}

/// HTTP client for the portal backend.
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
    tokens: Arc<TokenStore>,
    expiry_tx: broadcast::Sender<SessionExpired>,
    timeout_secs: u64,
}

impl ApiClient {
    /// Create a client from portal configuration.
    pub fn new(config: &PortalConfig, tokens: Arc<TokenStore>) -> Self {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()
            .expect("Failed to create HTTP client");
        let (expiry_tx, _) = broadcast::channel(EXPIRY_CHANNEL_CAPACITY);

        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            http,
            tokens,
            expiry_tx,
            timeout_secs: config.request_timeout_secs,
        }
    }

    /// Subscribe to session-expired events.
    pub fn subscribe_expiry(&self) -> broadcast::Receiver<SessionExpired> {
        self.expiry_tx.subscribe()
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    // ── Auth surface (credential exchange, no global 401 policy) ──

    /// Exchange credentials for a bearer token. Form-encoded, per the
    /// backend's OAuth2 password flow. A 401 here means bad credentials
    /// and surfaces as `Rejected`, never as a session expiry.
    pub async fn login(&self, username: &str, password: &str) -> Result<TokenGrant, ApiError> {
        let response = self
            .http
            .post(self.url("/api/auth/login"))
            .form(&[("username", username), ("password", password)])
            .send()
            .await
            .map_err(|e| self.map_transport(e))?;
        Self::decode(response).await
    }

    /// Create a patient account. Unauthenticated.
    pub async fn register(&self, request: &RegisterRequest) -> Result<RegisterAck, ApiError> {
        let response = self
            .http
            .post(self.url("/api/auth/patient/register"))
            .json(request)
            .send()
            .await
            .map_err(|e| self.map_transport(e))?;
        Self::decode(response).await
    }

    /// Fetch the profile behind an explicit token.
    ///
    /// Used by the session store during login and cold-start restore,
    /// which own the failure handling on this path — so a 401 surfaces
    /// as `Rejected` instead of firing the global expiry policy.
    pub async fn current_user(&self, token: &str) -> Result<User, ApiError> {
        let response = self
            .http
            .get(self.url("/api/auth/me"))
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| self.map_transport(e))?;
        Self::decode(response).await
    }

    /// Change the signed-in user's password.
    pub async fn change_password(
        &self,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), ApiError> {
        let body = PasswordChangeRequest {
            current_password,
            new_password,
        };
        let path = "/api/auth/change-password";
        let response = self
            .execute_authenticated(self.http.post(self.url(path)).json(&body), path)
            .await?;
        if response.status().is_success() {
            Ok(())
        } else {
            Err(ApiError::from_response(response).await)
        }
    }

    // ── Generic authenticated surface (widgets, providers) ──────

    /// GET an authenticated JSON resource.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self
            .execute_authenticated(self.http.get(self.url(path)), path)
            .await?;
        Self::decode(response).await
    }

    /// POST a JSON body to an authenticated endpoint and decode the reply.
    pub async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let response = self
            .execute_authenticated(self.http.post(self.url(path)).json(body), path)
            .await?;
        Self::decode(response).await
    }

    // ── Internals ───────────────────────────────────────────────

    /// Attach the stored bearer token, send, and apply the global
    /// unauthorized policy to the response.
    async fn execute_authenticated(
        &self,
        request: reqwest::RequestBuilder,
        path: &str,
    ) -> Result<reqwest::Response, ApiError> {
        let request = match self.tokens.get() {
            Ok(Some(token)) => request.bearer_auth(token),
            Ok(None) => request,
            Err(err) => {
                tracing::warn!(%err, "token read failed, sending request without credentials");
                request
            }
        };

        let response = request.send().await.map_err(|e| self.map_transport(e))?;

        if response.status() == StatusCode::UNAUTHORIZED {
            self.expire_session(path);
            return Err(ApiError::Unauthorized);
        }
        Ok(response)
    }

    /// Global unauthorized policy: purge the persisted token and tell
    /// subscribers the session is gone.
    fn expire_session(&self, path: &str) {
        if let Err(err) = self.tokens.clear() {
            tracing::warn!(%err, "could not clear persisted token after unauthorized response");
        }
        tracing::info!(path, "unauthorized response, signing out");
        let _ = self.expiry_tx.send(SessionExpired {
            path: path.to_string(),
        });
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
        if !response.status().is_success() {
            return Err(ApiError::from_response(response).await);
        }
        response
            .json()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    fn map_transport(&self, err: reqwest::Error) -> ApiError {
        if err.is_timeout() {
            ApiError::Timeout(self.timeout_secs)
        } else if err.is_connect() {
            ApiError::Transport(format!("could not connect to {}", self.base_url))
        } else {
            ApiError::Transport(err.to_string())
        }
    }
}
