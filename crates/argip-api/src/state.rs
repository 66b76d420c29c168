//! Shared state handed to every handler.

use std::time::Duration;

use argip_telemetry::Metrics;

use crate::facade::{SharedAccounts, SharedCatalog};

/// Dependencies shared by the router and its handlers.
pub struct ApiState {
    pub(crate) accounts: SharedAccounts,
    pub(crate) catalog: SharedCatalog,
    pub(crate) telemetry: Metrics,
    pub(crate) token_ttl: Duration,
}

impl ApiState {
    /// Bundle the storage facades, metrics handle, and token lifetime.
    #[must_use]
    pub fn new(
        accounts: SharedAccounts,
        catalog: SharedCatalog,
        telemetry: Metrics,
        token_ttl: Duration,
    ) -> Self {
        Self {
            accounts,
            catalog,
            telemetry,
            token_ttl,
        }
    }
}
