//! Application root wiring.
//!
//! `Portal` owns the shared pieces — token store, API client, session
//! store — and the task translating session-expired events into the
//! logged-out transition. Built once at startup and injected; nothing
//! here is a global.

use std::sync::Arc;

use crate::api::ApiClient;
use crate::assistant::Conversation;
use crate::config::{self, PortalConfig};
use crate::providers::LiveProvider;
use crate::session::SessionStore;
use crate::token_store::TokenStore;

/// The composed portal client.
///
/// Must be constructed inside a tokio runtime: the expiry listener is
/// spawned at construction time. Dropping the portal stops it.
pub struct Portal {
    config: PortalConfig,
    api: Arc<ApiClient>,
    session: Arc<SessionStore<Arc<ApiClient>>>,
    expiry_listener: tokio::task::JoinHandle<()>,
}

impl Portal {
    /// Wire token store, API client, and session store together.
    pub fn new(config: PortalConfig) -> Self {
        tracing::info!(base_url = %config.base_url, "Medikal client starting v{}", config::APP_VERSION);

        let tokens = Arc::new(TokenStore::new(config.token_path()));
        let api = Arc::new(ApiClient::new(&config, Arc::clone(&tokens)));
        let session = Arc::new(SessionStore::new(Arc::clone(&api), tokens));
        let expiry_listener = session.listen_for_expiry(api.subscribe_expiry());

        Self {
            config,
            api,
            session,
            expiry_listener,
        }
    }

    pub fn config(&self) -> &PortalConfig {
        &self.config
    }

    /// The single outbound HTTP client, for widgets making their own
    /// authenticated calls.
    pub fn api(&self) -> &Arc<ApiClient> {
        &self.api
    }

    /// The session store. Route guards and widgets subscribe here.
    pub fn session(&self) -> &Arc<SessionStore<Arc<ApiClient>>> {
        &self.session
    }

    /// Live data provider over this portal's API client.
    pub fn live_data(&self) -> LiveProvider {
        LiveProvider::new(Arc::clone(&self.api))
    }

    /// Start an assistant conversation in the given language.
    pub fn conversation(&self, language: &str) -> Conversation {
        Conversation::new(language)
    }
}

impl Drop for Portal {
    fn drop(&mut self) {
        self.expiry_listener.abort();
    }
}
