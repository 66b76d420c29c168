//! Router construction and server host for the API.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use argip_telemetry::{REQUEST_ID_HEADER, build_sha, request_id_layers};
use axum::{
    Router,
    http::{
        HeaderValue, Method, Request,
        header::{AUTHORIZATION, CONTENT_TYPE},
    },
    middleware,
    routing::{delete, get, post},
};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::{Span, info};

use crate::error::{ApiServerError, ApiServerResult};
use crate::http::auth::require_bearer;
use crate::http::health::{health, metrics, root};
use crate::http::nuts::{create_nut, delete_nut, get_nut, list_nuts, update_nut};
use crate::http::ranges::{create_range, delete_range, get_range, list_ranges, update_range};
use crate::http::screw_lengths::{create_screw_length, delete_screw_length, list_screw_lengths};
use crate::http::session::{login, logout, me, register};
use crate::http::telemetry::track_http;
use crate::state::ApiState;

/// Axum router wrapper that hosts the Argip API.
pub struct ApiServer {
    router: Router,
}

impl ApiServer {
    /// Build the router over the supplied state, allowing the given CORS origins.
    ///
    /// # Errors
    ///
    /// Returns [`ApiServerError::CorsOrigin`] when an origin is not a valid header value.
    pub fn new(state: ApiState, cors_origins: &[String]) -> ApiServerResult<Self> {
        let cors = cors_layer(cors_origins)?;
        let state = Arc::new(state);

        let trace_layer = TraceLayer::new_for_http()
            .make_span_with(|request: &Request<_>| {
                let request_id = request
                    .headers()
                    .get(REQUEST_ID_HEADER)
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("")
                    .to_string();
                tracing::info_span!(
                    "http.request",
                    method = %request.method(),
                    route = %request.uri().path(),
                    request_id = %request_id,
                    build_sha = %build_sha(),
                    status_code = tracing::field::Empty,
                    latency_ms = tracing::field::Empty
                )
            })
            .on_request(|_request: &Request<_>, _span: &Span| {})
            .on_response(
                |response: &axum::response::Response, latency: Duration, span: &Span| {
                    span.record("status_code", response.status().as_u16());
                    let latency_ms = u64::try_from(latency.as_millis()).unwrap_or(u64::MAX);
                    span.record("latency_ms", latency_ms);
                },
            );
        let (assign_request_id, echo_request_id) = request_id_layers();
        let layered = ServiceBuilder::new()
            .layer(assign_request_id)
            .layer(echo_request_id)
            .layer(trace_layer)
            .layer(middleware::from_fn_with_state(state.clone(), track_http));

        let router = Self::public_routes()
            .merge(Self::protected_routes(&state))
            .route_layer(layered)
            .layer(cors)
            .with_state(state);

        Ok(Self { router })
    }

    fn public_routes() -> Router<Arc<ApiState>> {
        Router::new()
            .route("/", get(root))
            .route("/health", get(health))
            .route("/metrics", get(metrics))
            .route("/register", post(register))
            .route("/login", post(login))
    }

    fn protected_routes(state: &Arc<ApiState>) -> Router<Arc<ApiState>> {
        let require = middleware::from_fn_with_state(state.clone(), require_bearer);

        Router::new()
            .route("/me", get(me))
            .route("/logout", post(logout))
            .route("/api/ranges", get(list_ranges).post(create_range))
            .route(
                "/api/ranges/{id}",
                get(get_range).put(update_range).delete(delete_range),
            )
            .route("/api/nuts", get(list_nuts).post(create_nut))
            .route(
                "/api/nuts/{id}",
                get(get_nut).put(update_nut).delete(delete_nut),
            )
            .route(
                "/api/screw-lengths",
                get(list_screw_lengths).post(create_screw_length),
            )
            .route("/api/screw-lengths/{id}", delete(delete_screw_length))
            .route_layer(require)
    }

    /// Serve on `addr` until `shutdown` resolves.
    ///
    /// # Errors
    ///
    /// Returns an error if the listener fails to bind or the server terminates unexpectedly.
    pub async fn serve<F>(self, addr: SocketAddr, shutdown: F) -> ApiServerResult<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| ApiServerError::Bind { addr, source })?;
        info!(%addr, "api listening");
        axum::serve(listener, self.router.into_make_service())
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|source| ApiServerError::Serve { source })
    }

    #[cfg(test)]
    pub(crate) fn router(&self) -> Router {
        self.router.clone()
    }
}

fn cors_layer(origins: &[String]) -> ApiServerResult<CorsLayer> {
    let allowed = origins
        .iter()
        .map(|origin| {
            HeaderValue::from_str(origin).map_err(|source| ApiServerError::CorsOrigin {
                origin: origin.clone(),
                source,
            })
        })
        .collect::<ApiServerResult<Vec<_>>>()?;
    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE]))
}
