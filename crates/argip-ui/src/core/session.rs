//! Bearer token storage.
//!
//! # Design
//! - The store is injected into the API client and the route guard, never read as a global.
//! - Tokens are opaque: no shape or expiry checks happen client-side.
//! - A blank stored value counts as no token.

use std::cell::RefCell;
use std::rc::Rc;

/// Persistence for the session bearer token.
pub trait TokenStore {
    /// Persist `token`, replacing any previous value.
    fn set(&self, token: &str);
    /// The stored token, if any.
    fn get(&self) -> Option<String>;
    /// Forget the stored token.
    fn remove(&self);
    /// Whether a token is present.
    fn is_authenticated(&self) -> bool {
        self.get().is_some()
    }
}

/// Shared handle used by contexts and the API client.
pub type SharedTokenStore = Rc<dyn TokenStore>;

/// In-memory store used when browser storage is unavailable and in tests.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    slot: RefCell<Option<String>>,
}

impl MemoryTokenStore {
    /// Store pre-seeded with `token`.
    #[must_use]
    pub fn with_token(token: &str) -> Self {
        let store = Self::default();
        store.set(token);
        store
    }
}

impl TokenStore for MemoryTokenStore {
    fn set(&self, token: &str) {
        *self.slot.borrow_mut() = Some(token.to_string());
    }

    fn get(&self) -> Option<String> {
        self.slot
            .borrow()
            .as_ref()
            .filter(|token| !token.trim().is_empty())
            .cloned()
    }

    fn remove(&self) {
        self.slot.borrow_mut().take();
    }
}
