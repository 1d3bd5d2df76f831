//! Client core for the Medikal multi-role healthcare portal.
//!
//! Owns the pieces of the single-page portal that carry real
//! invariants: the bearer-token lifecycle, the single outbound HTTP
//! client with its global unauthorized policy, the session state
//! machine, and role-gated route decisions. Dashboard widgets build on
//! the [`providers::DataProvider`] seam; the AI assistant chat wrapper
//! lives in [`assistant`]. The backend and the AI model are external
//! collaborators reached only over REST.

pub mod api; // Outbound HTTP client + error taxonomy
pub mod assistant; // AI chat wrapper with offline fallback
pub mod config;
pub mod guard; // Role-gated route decisions
pub mod models;
pub mod portal; // Composition root
pub mod providers; // Live/fixture data seam
pub mod session; // Session state machine
pub mod token_store;

pub use api::{ApiClient, ApiError, SessionExpired};
pub use config::PortalConfig;
pub use guard::{RouteGuard, RouteOutcome};
pub use models::Role;
pub use portal::Portal;
pub use session::{AuthBackend, SessionError, SessionState, SessionStore};
pub use token_store::TokenStore;

use tracing_subscriber::EnvFilter;

/// Initialize tracing for the host application.
///
/// Call once at startup, before constructing a [`Portal`]. Honors
/// `RUST_LOG`, falling back to the crate default filter.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();
}
