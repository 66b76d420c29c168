//! Range endpoints.

use std::sync::Arc;

use argip_api_models::{Range, RangeCreate, RangeUpdate};
use axum::{Json, extract::State, http::StatusCode};
use tracing::info;

use crate::http::constants::MSG_RANGE_NOT_FOUND;
use crate::http::errors::ApiError;
use crate::http::extract::{ApiJson, ApiPath};
use crate::state::ApiState;

pub(crate) async fn list_ranges(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<Vec<Range>>, ApiError> {
    let ranges = state
        .catalog
        .list_ranges()
        .await
        .map_err(|err| ApiError::storage(&err, "failed to list ranges"))?;
    Ok(Json(ranges))
}

pub(crate) async fn get_range(
    State(state): State<Arc<ApiState>>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<Range>, ApiError> {
    state
        .catalog
        .get_range(id)
        .await
        .map_err(|err| ApiError::storage(&err, "failed to load range"))?
        .map(Json)
        .ok_or_else(|| ApiError::not_found(MSG_RANGE_NOT_FOUND))
}

pub(crate) async fn create_range(
    State(state): State<Arc<ApiState>>,
    ApiJson(payload): ApiJson<RangeCreate>,
) -> Result<(StatusCode, Json<Range>), ApiError> {
    payload.validate()?;
    let range = state
        .catalog
        .insert_range(&payload)
        .await
        .map_err(|err| ApiError::storage(&err, "failed to create range"))?;
    state.telemetry.inc_catalog_mutation("range", "create");
    info!(range_id = range.id, "range created");
    Ok((StatusCode::CREATED, Json(range)))
}

/// Partial update; bounds are re-validated on the merged record.
pub(crate) async fn update_range(
    State(state): State<Arc<ApiState>>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(payload): ApiJson<RangeUpdate>,
) -> Result<Json<Range>, ApiError> {
    let current = state
        .catalog
        .get_range(id)
        .await
        .map_err(|err| ApiError::storage(&err, "failed to load range"))?
        .ok_or_else(|| ApiError::not_found(MSG_RANGE_NOT_FOUND))?;
    let merged = payload.apply(&current);
    merged.validate()?;

    let range = state
        .catalog
        .update_range(id, &merged)
        .await
        .map_err(|err| ApiError::storage(&err, "failed to update range"))?
        .ok_or_else(|| ApiError::not_found(MSG_RANGE_NOT_FOUND))?;
    state.telemetry.inc_catalog_mutation("range", "update");
    Ok(Json(range))
}

pub(crate) async fn delete_range(
    State(state): State<Arc<ApiState>>,
    ApiPath(id): ApiPath<i64>,
) -> Result<StatusCode, ApiError> {
    let removed = state
        .catalog
        .delete_range(id)
        .await
        .map_err(|err| ApiError::storage(&err, "failed to delete range"))?;
    if !removed {
        return Err(ApiError::not_found(MSG_RANGE_NOT_FOUND));
    }
    state.telemetry.inc_catalog_mutation("range", "delete");
    info!(range_id = id, "range deleted");
    Ok(StatusCode::NO_CONTENT)
}
