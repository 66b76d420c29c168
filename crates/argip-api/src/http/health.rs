//! Service banner, health, and metrics endpoints.

use std::sync::Arc;

use argip_api_models::{HealthResponse, ServiceInfo};
use axum::{Json, body::Body, extract::State, http::StatusCode, response::Response};
use tracing::{error, warn};

use crate::http::constants::{SERVICE_MESSAGE, SERVICE_VERSION};
use crate::http::errors::ApiError;
use crate::state::ApiState;

pub(crate) async fn root() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        message: SERVICE_MESSAGE.to_string(),
        version: SERVICE_VERSION.to_string(),
    })
}

pub(crate) async fn health(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<HealthResponse>, ApiError> {
    match state.accounts.ping().await {
        Ok(()) => Ok(Json(HealthResponse {
            status: "healthy".to_string(),
        })),
        Err(err) => {
            warn!(error = %err, "health check failed to reach database");
            Err(ApiError::service_unavailable(
                "database is currently unavailable",
            ))
        }
    }
}

pub(crate) async fn metrics(State(state): State<Arc<ApiState>>) -> Result<Response, ApiError> {
    match state.telemetry.render() {
        Ok(body) => Response::builder()
            .status(StatusCode::OK)
            .header(
                axum::http::header::CONTENT_TYPE,
                "text/plain; version=0.0.4",
            )
            .body(Body::from(body))
            .map_err(|err| {
                error!(error = %err, "failed to build metrics response");
                ApiError::internal("failed to build metrics response")
            }),
        Err(err) => {
            error!(error = %err, "failed to render metrics");
            Err(ApiError::internal("failed to render metrics"))
        }
    }
}
