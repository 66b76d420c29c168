//! Route guard decisions.
//!
//! # Design
//! - Authentication is decided only by token presence at render time.
//! - The server is consulted again only when a protected fetch fails.

use crate::core::failure::ApiFailure;
use crate::core::session::TokenStore;

/// Whether the visitor may see protected routes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardState {
    /// A token is stored.
    Authenticated,
    /// No token is stored.
    Unauthenticated,
}

impl GuardState {
    /// Derive the guard state from the token store.
    #[must_use]
    pub fn from_store(store: &dyn TokenStore) -> Self {
        if store.is_authenticated() {
            Self::Authenticated
        } else {
            Self::Unauthenticated
        }
    }

    /// Whether protected content may render.
    #[must_use]
    pub const fn allows(self) -> bool {
        matches!(self, Self::Authenticated)
    }
}

/// Outcome of loading the current user while nominally authenticated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProfileOutcome {
    /// Keep rendering the protected shell.
    Stay,
    /// The token has been cleared; navigate to login.
    RedirectToLogin,
}

/// Any failure to load the profile ends the session.
#[must_use]
pub fn on_profile_failure(store: &dyn TokenStore, _failure: &ApiFailure) -> ProfileOutcome {
    store.remove();
    ProfileOutcome::RedirectToLogin
}

/// A 401 from any protected fetch ends the session; other failures stay in the view.
#[must_use]
pub fn on_protected_failure(store: &dyn TokenStore, failure: &ApiFailure) -> ProfileOutcome {
    if matches!(failure, ApiFailure::Unauthorized) {
        store.remove();
        ProfileOutcome::RedirectToLogin
    } else {
        ProfileOutcome::Stay
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::session::MemoryTokenStore;

    #[test]
    fn guard_follows_token_presence() {
        let store = MemoryTokenStore::default();
        assert_eq!(GuardState::from_store(&store), GuardState::Unauthenticated);
        assert!(!GuardState::from_store(&store).allows());
        store.set("tok");
        assert_eq!(GuardState::from_store(&store), GuardState::Authenticated);
        assert!(GuardState::from_store(&store).allows());
    }

    #[test]
    fn profile_failure_clears_token_and_redirects() {
        let store = MemoryTokenStore::with_token("tok");
        let outcome = on_profile_failure(&store, &ApiFailure::Network("offline".to_string()));
        assert_eq!(outcome, ProfileOutcome::RedirectToLogin);
        assert_eq!(GuardState::from_store(&store), GuardState::Unauthenticated);
    }

    #[test]
    fn only_unauthorized_fetches_end_the_session() {
        let store = MemoryTokenStore::with_token("tok");
        let server_error = ApiFailure::Status {
            status: 500,
            detail: None,
        };
        assert_eq!(
            on_protected_failure(&store, &server_error),
            ProfileOutcome::Stay
        );
        assert!(store.is_authenticated());

        assert_eq!(
            on_protected_failure(&store, &ApiFailure::Unauthorized),
            ProfileOutcome::RedirectToLogin
        );
        assert!(!store.is_authenticated());
    }
}
