//! Process span and per-request scope.
//!
//! # Design
//! - The process span tags every event with the service name and build.
//! - The request scope holds only the `x-request-id`; routes are already on the trace span.

use std::future::Future;
use std::sync::Arc;

use tracing::span::EnteredSpan;

use crate::init::build_sha;

/// Keeps the process span entered until dropped.
pub struct GlobalContextGuard {
    _span: EnteredSpan,
}

impl GlobalContextGuard {
    /// Enter the process span for `service`.
    #[must_use]
    pub fn new(service: &'static str) -> Self {
        let span = tracing::info_span!("argip", service, build_sha = %build_sha());
        Self {
            _span: span.entered(),
        }
    }
}

tokio::task_local! {
    static REQUEST_ID: Arc<str>;
}

/// Request id of the request served by this task; `None` outside a request or when blank.
#[must_use]
pub fn current_request_id() -> Option<String> {
    REQUEST_ID
        .try_with(|id| (!id.is_empty()).then(|| id.to_string()))
        .ok()
        .flatten()
}

/// Run `fut` with `request_id` visible to [`current_request_id`].
pub async fn scope_request<Fut>(request_id: impl Into<Arc<str>>, fut: Fut) -> Fut::Output
where
    Fut: Future,
{
    REQUEST_ID.scope(request_id.into(), fut).await
}
