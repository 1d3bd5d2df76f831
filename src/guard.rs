//! Role-gated route decisions.
//!
//! A guard is declared per destination with the set of roles allowed to
//! enter. Evaluation is a pure function of the current session state —
//! the guard holds no state of its own and never redirects; it returns
//! what the host should render.

use crate::models::Role;
use crate::session::SessionState;

/// What the host should render for a navigation target.
#[derive(Debug, Clone, PartialEq)]
pub enum RouteOutcome {
    /// Session restore or login still in flight: show a loading view.
    Loading,
    /// Not signed in: show the login view, whatever was requested.
    Login,
    /// Signed in but the role does not permit this destination.
    /// Shown as a dedicated access-denied view, never a redirect.
    Denied { required: Vec<Role>, actual: Role },
    /// Render the requested destination.
    Allow,
}

/// Declared access constraint for one destination.
#[derive(Debug, Clone)]
pub struct RouteGuard {
    allowed: Vec<Role>,
}

impl RouteGuard {
    /// Destination restricted to the given roles.
    pub fn require(roles: impl IntoIterator<Item = Role>) -> Self {
        Self {
            allowed: roles.into_iter().collect(),
        }
    }

    /// Destination restricted to a single role.
    pub fn require_role(role: Role) -> Self {
        Self::require([role])
    }

    /// Destination open to any signed-in user.
    pub fn any_authenticated() -> Self {
        Self { allowed: Vec::new() }
    }

    /// Roles permitted by this guard. Empty means any signed-in role.
    pub fn allowed(&self) -> &[Role] {
        &self.allowed
    }

    /// Decide what to render for the current session state.
    pub fn evaluate(&self, state: &SessionState) -> RouteOutcome {
        match state {
            SessionState::Loading => RouteOutcome::Loading,
            SessionState::Unauthenticated { .. } => RouteOutcome::Login,
            SessionState::Authenticated(user) => {
                if self.allowed.is_empty() || self.allowed.contains(&user.role) {
                    RouteOutcome::Allow
                } else {
                    RouteOutcome::Denied {
                        required: self.allowed.clone(),
                        actual: user.role,
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::enums::UserStatus;
    use crate::models::User;
    use chrono::Utc;

    fn authenticated_as(role: Role) -> SessionState {
        SessionState::Authenticated(User {
            id: "u_1".into(),
            username: "jdoe".into(),
            email: "jdoe@example.org".into(),
            full_name: "John Doe".into(),
            role,
            status: UserStatus::Active,
            created_at: Utc::now(),
            last_login: None,
            must_change_password: false,
        })
    }

    #[test]
    fn loading_session_shows_loading() {
        let guard = RouteGuard::require_role(Role::Patient);
        assert_eq!(guard.evaluate(&SessionState::Loading), RouteOutcome::Loading);
    }

    #[test]
    fn logged_out_shows_login_regardless_of_destination() {
        let state = SessionState::Unauthenticated { error: None };
        for guard in [
            RouteGuard::require_role(Role::Admin),
            RouteGuard::any_authenticated(),
        ] {
            assert_eq!(guard.evaluate(&state), RouteOutcome::Login);
        }
    }

    #[test]
    fn matching_role_is_allowed() {
        let guard = RouteGuard::require_role(Role::Doctor);
        assert_eq!(guard.evaluate(&authenticated_as(Role::Doctor)), RouteOutcome::Allow);
    }

    #[test]
    fn mismatched_role_is_denied_with_both_roles_stated() {
        let guard = RouteGuard::require_role(Role::Admin);
        match guard.evaluate(&authenticated_as(Role::Doctor)) {
            RouteOutcome::Denied { required, actual } => {
                assert_eq!(required, vec![Role::Admin]);
                assert_eq!(actual, Role::Doctor);
            }
            other => panic!("Expected Denied, got: {other:?}"),
        }
    }

    #[test]
    fn multi_role_guard_accepts_any_listed_role() {
        let guard = RouteGuard::require([Role::Doctor, Role::Admin]);
        assert_eq!(guard.evaluate(&authenticated_as(Role::Admin)), RouteOutcome::Allow);
        assert_eq!(guard.evaluate(&authenticated_as(Role::Doctor)), RouteOutcome::Allow);
        assert!(matches!(
            guard.evaluate(&authenticated_as(Role::Patient)),
            RouteOutcome::Denied { .. }
        ));
    }

    #[test]
    fn open_guard_accepts_every_role() {
        let guard = RouteGuard::any_authenticated();
        for role in [Role::Patient, Role::Doctor, Role::Admin, Role::Ai] {
            assert_eq!(guard.evaluate(&authenticated_as(role)), RouteOutcome::Allow);
        }
    }
}
