//! Session store — the single source of truth for "who is logged in".
//!
//! State machine:
//! - `Loading` — an auth operation (cold-start restore, login, register)
//!   is in flight. Initial state.
//! - `Unauthenticated { error }` — logged out; `error` annotates the last
//!   failed attempt and is not a separate state.
//! - `Authenticated(user)` — logged in.
//!
//! The state is published through a `tokio::sync::watch` channel so the
//! route guard and widgets subscribe explicitly instead of reaching into
//! a global. Auth operations are serialized with an in-flight guard: a
//! second `login`/`register` while one is running is rejected locally
//! and leaves the state untouched. The guard is cancellation-safe —
//! dropping an operation future mid-flight resets `Loading` back to
//! logged-out — and every operation carries an epoch stamp so a stale
//! completion can never overwrite a `logout` that raced it.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::{broadcast, watch};

use crate::api::{ApiClient, ApiError, RegisterAck, RegisterRequest, SessionExpired, TokenGrant};
use crate::models::{Role, User};
use crate::token_store::TokenStore;

/// Message shown after the backend invalidated the session.
pub const SESSION_EXPIRED_MESSAGE: &str = "Your session has expired. Please sign in again.";

const GENERIC_LOGIN_ERROR: &str = "Login failed";
const GENERIC_REGISTER_ERROR: &str = "Registration failed";

// ═══════════════════════════════════════════════════════════
// AuthBackend — seam between the session machine and HTTP
// ═══════════════════════════════════════════════════════════

/// The three backend calls the session lifecycle depends on.
///
/// `ApiClient` is the live implementation; tests drive the state machine
/// with an in-memory fake.
pub trait AuthBackend: Send + Sync {
    /// Exchange credentials for a bearer token.
    fn login(
        &self,
        username: &str,
        password: &str,
    ) -> impl Future<Output = Result<TokenGrant, ApiError>> + Send;

    /// Fetch the profile behind a token.
    fn current_user(&self, token: &str) -> impl Future<Output = Result<User, ApiError>> + Send;

    /// Create a new patient account.
    fn register(
        &self,
        request: &RegisterRequest,
    ) -> impl Future<Output = Result<RegisterAck, ApiError>> + Send;
}

impl AuthBackend for ApiClient {
    async fn login(&self, username: &str, password: &str) -> Result<TokenGrant, ApiError> {
        ApiClient::login(self, username, password).await
    }

    async fn current_user(&self, token: &str) -> Result<User, ApiError> {
        ApiClient::current_user(self, token).await
    }

    async fn register(&self, request: &RegisterRequest) -> Result<RegisterAck, ApiError> {
        ApiClient::register(self, request).await
    }
}

impl<B: AuthBackend> AuthBackend for Arc<B> {
    fn login(
        &self,
        username: &str,
        password: &str,
    ) -> impl Future<Output = Result<TokenGrant, ApiError>> + Send {
        (**self).login(username, password)
    }

    fn current_user(&self, token: &str) -> impl Future<Output = Result<User, ApiError>> + Send {
        (**self).current_user(token)
    }

    fn register(
        &self,
        request: &RegisterRequest,
    ) -> impl Future<Output = Result<RegisterAck, ApiError>> + Send {
        (**self).register(request)
    }
}

// ═══════════════════════════════════════════════════════════
// SessionState
// ═══════════════════════════════════════════════════════════

/// Observable session state, published on a watch channel.
#[derive(Debug, Clone)]
pub enum SessionState {
    /// An auth operation is in flight.
    Loading,
    /// Logged out. `error` annotates the last failed attempt.
    Unauthenticated { error: Option<String> },
    /// Logged in as the given user.
    Authenticated(User),
}

impl SessionState {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }

    pub fn user(&self) -> Option<&User> {
        match self {
            Self::Authenticated(user) => Some(user),
            _ => None,
        }
    }

    pub fn role(&self) -> Option<Role> {
        self.user().map(|u| u.role)
    }

    /// Error message from the last failed auth attempt, if any.
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Unauthenticated { error } => error.as_deref(),
            _ => None,
        }
    }

    pub fn is_patient(&self) -> bool {
        self.role() == Some(Role::Patient)
    }

    pub fn is_doctor(&self) -> bool {
        self.role() == Some(Role::Doctor)
    }

    pub fn is_admin(&self) -> bool {
        self.role() == Some(Role::Admin)
    }

    pub fn is_ai(&self) -> bool {
        self.role() == Some(Role::Ai)
    }
}

/// Errors reported to the caller of a session operation.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// Another login/register is already running ("ignore while loading").
    #[error("Another sign-in attempt is already in progress")]
    OperationInFlight,
    /// A concurrent sign-out interrupted the operation.
    #[error("Signed out before the operation finished")]
    Cancelled,
    /// The operation failed; the message is ready for display.
    #[error("{0}")]
    Rejected(String),
}

// ═══════════════════════════════════════════════════════════
// SessionStore
// ═══════════════════════════════════════════════════════════

/// Owns the session lifecycle and the token persistence around it.
///
/// Constructed once by the application root ([`crate::Portal`]) and
/// injected wherever auth state is needed.
pub struct SessionStore<B: AuthBackend> {
    backend: B,
    tokens: Arc<TokenStore>,
    state: watch::Sender<SessionState>,
    /// Bumped whenever an operation starts or a `logout` interrupts
    /// one. Terminal transitions only commit if their epoch is still
    /// current and the state is still `Loading`.
    epoch: AtomicU64,
}

/// Scope guard for an in-flight auth operation.
///
/// Held across the operation's await points; if the caller drops the
/// future mid-flight (navigation, `select!`, a caller-side timeout),
/// the drop resets `Loading` back to logged-out so later attempts are
/// not rejected against an operation that no longer exists.
struct LoadingGuard<'a, B: AuthBackend> {
    store: &'a SessionStore<B>,
    epoch: u64,
}

impl<B: AuthBackend> Drop for LoadingGuard<'_, B> {
    fn drop(&mut self) {
        // No-op when the operation already committed a terminal state.
        self.store
            .commit(self.epoch, SessionState::Unauthenticated { error: None });
    }
}

impl<B: AuthBackend> SessionStore<B> {
    /// Create a store in the initial `Loading` state.
    pub fn new(backend: B, tokens: Arc<TokenStore>) -> Self {
        let (state, _) = watch::channel(SessionState::Loading);
        Self {
            backend,
            tokens,
            state,
            epoch: AtomicU64::new(0),
        }
    }

    /// Subscribe to session state changes.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    /// Snapshot of the current state.
    pub fn current(&self) -> SessionState {
        self.state.borrow().clone()
    }

    // ── Lifecycle operations ────────────────────────────────

    /// Restore the session from the persisted token, if any.
    ///
    /// No token → `Unauthenticated` with no error. A token the server
    /// rejects is purged and the session resets to logged-out, also
    /// without an error — a stale token is not the user's mistake.
    pub async fn initialize(&self) {
        let op = self.start_loading();

        let token = match self.tokens.get() {
            Ok(Some(token)) => token,
            Ok(None) => return,
            Err(err) => {
                tracing::warn!(%err, "could not read persisted token");
                return;
            }
        };

        match self.backend.current_user(&token).await {
            Ok(user) => {
                if self.commit(op.epoch, SessionState::Authenticated(user.clone())) {
                    tracing::info!(username = %user.username, role = %user.role, "session restored");
                }
            }
            Err(err) => {
                tracing::debug!(%err, "stored token rejected, purging");
                if let Err(e) = self.tokens.clear() {
                    tracing::warn!(%e, "could not remove stale token");
                }
            }
        }
        // The guard's drop resolves the remaining paths to logged-out.
    }

    /// Sign in. Credential exchange, then profile fetch; both must
    /// succeed. If the profile fetch fails after a token was granted,
    /// the token is rolled back and the whole operation reports failure.
    pub async fn login(&self, username: &str, password: &str) -> Result<User, SessionError> {
        let op = self.begin()?;
        self.login_inner(&op, username, password).await
    }

    /// Create a patient account, then sign in with the same credentials.
    /// The caller gets whatever result that login produces.
    pub async fn register(&self, request: &RegisterRequest) -> Result<User, SessionError> {
        let op = self.begin()?;
        if let Err(err) = self.backend.register(request).await {
            return Err(self.fail(&op, &err, GENERIC_REGISTER_ERROR));
        }
        self.login_inner(&op, &request.username, &request.password)
            .await
    }

    /// Sign out locally. Always succeeds, performs no network I/O, and
    /// is a no-op when already logged out.
    pub fn logout(&self) {
        if let Err(err) = self.tokens.clear() {
            tracing::warn!(%err, "could not remove persisted token on logout");
        }
        self.state.send_if_modified(|state| {
            if matches!(state, SessionState::Unauthenticated { error: None }) {
                return false;
            }
            // Invalidate any in-flight operation so its late completion
            // cannot resurrect the session.
            self.epoch.fetch_add(1, Ordering::SeqCst);
            *state = SessionState::Unauthenticated { error: None };
            true
        });
    }

    /// React to the API client's session-expired event: transition to
    /// logged-out exactly once per expiry, no-op when not signed in.
    /// The API client already purged the token.
    pub fn handle_session_expired(&self) {
        let mut expired = false;
        self.state.send_if_modified(|state| {
            if state.is_authenticated() {
                *state = SessionState::Unauthenticated {
                    error: Some(SESSION_EXPIRED_MESSAGE.to_string()),
                };
                expired = true;
                true
            } else {
                false
            }
        });
        if expired {
            tracing::info!("session expired, signed out");
        }
    }

    // ── Internals ───────────────────────────────────────────

    /// Flip to `Loading`, rejecting the call if an operation is already
    /// in flight. Runs under the watch lock, so two concurrent callers
    /// cannot both pass.
    fn begin(&self) -> Result<LoadingGuard<'_, B>, SessionError> {
        let mut epoch = None;
        self.state.send_if_modified(|state| {
            if state.is_loading() {
                false
            } else {
                *state = SessionState::Loading;
                epoch = Some(self.epoch.fetch_add(1, Ordering::SeqCst) + 1);
                true
            }
        });
        match epoch {
            Some(epoch) => Ok(LoadingGuard { store: self, epoch }),
            None => Err(SessionError::OperationInFlight),
        }
    }

    /// Like [`begin`](Self::begin) but unconditional, for the cold-start
    /// restore where the store is already `Loading`.
    fn start_loading(&self) -> LoadingGuard<'_, B> {
        let mut epoch = 0;
        self.state.send_if_modified(|state| {
            epoch = self.epoch.fetch_add(1, Ordering::SeqCst) + 1;
            *state = SessionState::Loading;
            true
        });
        LoadingGuard { store: self, epoch }
    }

    /// Commit a terminal state for the operation holding `epoch`.
    /// Returns `false` when the operation is no longer current — the
    /// state left `Loading` or a `logout` bumped the epoch — in which
    /// case the state is left untouched.
    fn commit(&self, epoch: u64, next: SessionState) -> bool {
        self.state.send_if_modified(|state| {
            if state.is_loading() && self.epoch.load(Ordering::SeqCst) == epoch {
                *state = next;
                true
            } else {
                false
            }
        })
    }

    /// The two-step login, assuming the caller holds the in-flight guard.
    async fn login_inner(
        &self,
        op: &LoadingGuard<'_, B>,
        username: &str,
        password: &str,
    ) -> Result<User, SessionError> {
        let grant = match self.backend.login(username, password).await {
            Ok(grant) => grant,
            Err(err) => return Err(self.fail(op, &err, GENERIC_LOGIN_ERROR)),
        };

        if let Err(err) = self.tokens.set(&grant.access_token) {
            return Err(self.fail_message(op, format!("Could not persist session: {err}")));
        }

        match self.backend.current_user(&grant.access_token).await {
            Ok(user) => {
                if self.commit(op.epoch, SessionState::Authenticated(user.clone())) {
                    tracing::info!(username = %user.username, role = %user.role, "login succeeded");
                    Ok(user)
                } else {
                    // A logout raced the completion and wins; drop the
                    // token it may not have seen yet.
                    if let Err(e) = self.tokens.clear() {
                        tracing::warn!(%e, "could not remove token after interrupted login");
                    }
                    Err(SessionError::Cancelled)
                }
            }
            Err(err) => {
                // Token granted but profile fetch failed: roll the token
                // back so a half-usable session never survives a restart.
                if let Err(e) = self.tokens.clear() {
                    tracing::warn!(%e, "could not roll back token after profile fetch failure");
                }
                Err(self.fail(op, &err, GENERIC_LOGIN_ERROR))
            }
        }
    }

    fn fail(&self, op: &LoadingGuard<'_, B>, err: &ApiError, fallback: &str) -> SessionError {
        self.fail_message(op, err.user_message(fallback))
    }

    fn fail_message(&self, op: &LoadingGuard<'_, B>, message: String) -> SessionError {
        tracing::debug!(%message, "auth operation failed");
        self.commit(
            op.epoch,
            SessionState::Unauthenticated {
                error: Some(message.clone()),
            },
        );
        SessionError::Rejected(message)
    }
}

impl<B: AuthBackend + 'static> SessionStore<B> {
    /// Spawn a task that translates [`SessionExpired`] events from the
    /// API client into the logged-out transition.
    pub fn listen_for_expiry(
        self: &Arc<Self>,
        mut events: broadcast::Receiver<SessionExpired>,
    ) -> tokio::task::JoinHandle<()> {
        let store = Arc::clone(self);
        tokio::spawn(async move {
            loop {
                match events.recv().await {
                    Ok(event) => {
                        tracing::debug!(path = %event.path, "session-expired event received");
                        store.handle_session_expired();
                    }
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        tracing::debug!(skipped, "expiry listener lagged");
                        store.handle_session_expired();
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        })
    }
}

// ═══════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════
