//! Per-request metrics and request-id scope.

use std::sync::Arc;
use std::time::Instant;

use argip_telemetry::{REQUEST_ID_HEADER, scope_request};
use axum::extract::{MatchedPath, Request, State};
use axum::middleware::Next;
use axum::response::Response;

use crate::state::ApiState;

/// Count and time each request by matched route, with its request id in scope.
pub(crate) async fn track_http(
    State(state): State<Arc<ApiState>>,
    request: Request,
    next: Next,
) -> Response {
    let route = request.extensions().get::<MatchedPath>().map_or_else(
        || request.uri().path().to_string(),
        |matched| matched.as_str().to_string(),
    );
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string();

    let started = Instant::now();
    let response = scope_request(request_id, next.run(request)).await;
    state
        .telemetry
        .inc_http_request(&route, response.status().as_u16());
    state.telemetry.observe_http_latency(&route, started.elapsed());
    response
}
