//! API client context for sharing a singleton client instance.
//!
//! # Design
//! - Create exactly one API client per app boot.
//! - The token store travels with the client so every view sees the same session.

use std::rc::Rc;

use gloo::console;
use yew_router::prelude::Navigator;

use super::Route;
use crate::core::failure::ApiFailure;
use crate::core::guard::{ProfileOutcome, on_protected_failure};
use crate::core::session::SharedTokenStore;
use crate::services::api::ApiClient;

/// Shared API client context for UI services.
#[derive(Clone)]
pub(crate) struct ApiCtx {
    /// Singleton API client instance.
    pub(crate) client: Rc<ApiClient>,
}

impl ApiCtx {
    pub(crate) fn new(base_url: impl Into<String>, tokens: SharedTokenStore) -> Self {
        Self {
            client: Rc::new(ApiClient::new(base_url, tokens)),
        }
    }

    /// Log a failed protected call and leave for login when the session is gone.
    ///
    /// Returns `true` when the view navigated away and must not show its own message.
    pub(crate) fn session_ended(
        &self,
        operation: &'static str,
        failure: &ApiFailure,
        navigator: Option<&Navigator>,
    ) -> bool {
        console::error!(operation, failure.to_string());
        let ended = on_protected_failure(self.client.tokens().as_ref(), failure)
            == ProfileOutcome::RedirectToLogin;
        if ended && let Some(navigator) = navigator {
            navigator.push(&Route::Login);
        }
        ended
    }
}

impl PartialEq for ApiCtx {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.client, &other.client)
    }
}
