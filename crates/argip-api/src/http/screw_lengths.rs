//! Screw length endpoints. There is no update; records are replaced by delete and create.

use std::sync::Arc;

use argip_api_models::{ScrewLength, ScrewLengthCreate};
use axum::{Json, extract::State, http::StatusCode};
use tracing::info;

use crate::http::constants::{MSG_SCREW_EXISTS, MSG_SCREW_NOT_FOUND};
use crate::http::errors::ApiError;
use crate::http::extract::{ApiJson, ApiPath};
use crate::state::ApiState;

pub(crate) async fn list_screw_lengths(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<Vec<ScrewLength>>, ApiError> {
    let screws = state
        .catalog
        .list_screw_lengths()
        .await
        .map_err(|err| ApiError::storage(&err, "failed to list screw lengths"))?;
    Ok(Json(screws))
}

pub(crate) async fn create_screw_length(
    State(state): State<Arc<ApiState>>,
    ApiJson(payload): ApiJson<ScrewLengthCreate>,
) -> Result<(StatusCode, Json<ScrewLength>), ApiError> {
    payload.validate()?;
    let exists = state
        .catalog
        .screw_length_exists(payload.srednica, payload.dlugosc)
        .await
        .map_err(|err| ApiError::storage(&err, "failed to check screw length"))?;
    if exists {
        return Err(ApiError::bad_request(MSG_SCREW_EXISTS));
    }

    let screw = state
        .catalog
        .insert_screw_length(&payload)
        .await
        .map_err(|err| {
            if err.unique_violation().is_some() {
                ApiError::bad_request(MSG_SCREW_EXISTS)
            } else {
                ApiError::storage(&err, "failed to create screw length")
            }
        })?;
    state.telemetry.inc_catalog_mutation("screw_length", "create");
    info!(screw_id = screw.id, "screw length created");
    Ok((StatusCode::CREATED, Json(screw)))
}

pub(crate) async fn delete_screw_length(
    State(state): State<Arc<ApiState>>,
    ApiPath(id): ApiPath<i64>,
) -> Result<StatusCode, ApiError> {
    let removed = state
        .catalog
        .delete_screw_length(id)
        .await
        .map_err(|err| ApiError::storage(&err, "failed to delete screw length"))?;
    if !removed {
        return Err(ApiError::not_found(MSG_SCREW_NOT_FOUND));
    }
    state.telemetry.inc_catalog_mutation("screw_length", "delete");
    Ok(StatusCode::NO_CONTENT)
}
