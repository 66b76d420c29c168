//! Nut endpoints.
//!
//! # Design
//! - A nut always references an existing range; the check runs on create and
//!   whenever an update moves the nut to another range.
//! - A foreign-key violation from a concurrently deleted range maps to the same 404.

use std::sync::Arc;

use argip_api_models::{Nut, NutCreate, NutListQuery, NutUpdate};
use argip_data::DataError;
use axum::{Json, extract::State, http::StatusCode};
use tracing::info;

use crate::http::constants::{MSG_NUT_NOT_FOUND, MSG_RANGE_NOT_FOUND};
use crate::http::errors::ApiError;
use crate::http::extract::{ApiJson, ApiPath, ApiQuery};
use crate::state::ApiState;

pub(crate) async fn list_nuts(
    State(state): State<Arc<ApiState>>,
    ApiQuery(query): ApiQuery<NutListQuery>,
) -> Result<Json<Vec<Nut>>, ApiError> {
    let nuts = state
        .catalog
        .list_nuts(query.range_id)
        .await
        .map_err(|err| ApiError::storage(&err, "failed to list nuts"))?;
    Ok(Json(nuts))
}

pub(crate) async fn get_nut(
    State(state): State<Arc<ApiState>>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<Nut>, ApiError> {
    state
        .catalog
        .get_nut(id)
        .await
        .map_err(|err| ApiError::storage(&err, "failed to load nut"))?
        .map(Json)
        .ok_or_else(|| ApiError::not_found(MSG_NUT_NOT_FOUND))
}

pub(crate) async fn create_nut(
    State(state): State<Arc<ApiState>>,
    ApiJson(payload): ApiJson<NutCreate>,
) -> Result<(StatusCode, Json<Nut>), ApiError> {
    payload.validate()?;
    ensure_range_exists(&state, payload.id_zakresu).await?;
    let nut = state
        .catalog
        .insert_nut(&payload)
        .await
        .map_err(|err| write_error(&err, "failed to create nut"))?;
    state.telemetry.inc_catalog_mutation("nut", "create");
    info!(nut_id = nut.id, range_id = nut.id_zakresu, "nut created");
    Ok((StatusCode::CREATED, Json(nut)))
}

pub(crate) async fn update_nut(
    State(state): State<Arc<ApiState>>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(payload): ApiJson<NutUpdate>,
) -> Result<Json<Nut>, ApiError> {
    let current = state
        .catalog
        .get_nut(id)
        .await
        .map_err(|err| ApiError::storage(&err, "failed to load nut"))?
        .ok_or_else(|| ApiError::not_found(MSG_NUT_NOT_FOUND))?;
    let merged = payload.apply(&current);
    merged.validate()?;
    if merged.id_zakresu != current.id_zakresu {
        ensure_range_exists(&state, merged.id_zakresu).await?;
    }

    let nut = state
        .catalog
        .update_nut(id, &merged)
        .await
        .map_err(|err| write_error(&err, "failed to update nut"))?
        .ok_or_else(|| ApiError::not_found(MSG_NUT_NOT_FOUND))?;
    state.telemetry.inc_catalog_mutation("nut", "update");
    Ok(Json(nut))
}

pub(crate) async fn delete_nut(
    State(state): State<Arc<ApiState>>,
    ApiPath(id): ApiPath<i64>,
) -> Result<StatusCode, ApiError> {
    let removed = state
        .catalog
        .delete_nut(id)
        .await
        .map_err(|err| ApiError::storage(&err, "failed to delete nut"))?;
    if !removed {
        return Err(ApiError::not_found(MSG_NUT_NOT_FOUND));
    }
    state.telemetry.inc_catalog_mutation("nut", "delete");
    info!(nut_id = id, "nut deleted");
    Ok(StatusCode::NO_CONTENT)
}

async fn ensure_range_exists(state: &ApiState, range_id: i64) -> Result<(), ApiError> {
    state
        .catalog
        .get_range(range_id)
        .await
        .map_err(|err| ApiError::storage(&err, "failed to load range"))?
        .map(|_| ())
        .ok_or_else(|| ApiError::not_found(MSG_RANGE_NOT_FOUND))
}

fn write_error(err: &DataError, context: &'static str) -> ApiError {
    if err.foreign_key_violation().is_some() {
        return ApiError::not_found(MSG_RANGE_NOT_FOUND);
    }
    ApiError::storage(err, context)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facade::CatalogFacade as _;
    use crate::test_support::{StubCatalog, catalog_state};
    use argip_api_models::RangeCreate;

    fn nut(id_zakresu: i64, nazwa: &str) -> NutCreate {
        NutCreate {
            id_zakresu,
            nazwa: nazwa.to_string(),
            srednica: 6.0,
            cena: 0.25,
        }
    }

    async fn seeded() -> (Arc<ApiState>, StubCatalog, i64, i64) {
        let catalog = StubCatalog::default();
        let small = catalog
            .insert_range(&RangeCreate {
                nazwa: "small".to_string(),
                od: 1.0,
                do_: 5.0,
            })
            .await
            .expect("range");
        let large = catalog
            .insert_range(&RangeCreate {
                nazwa: "large".to_string(),
                od: 5.0,
                do_: 20.0,
            })
            .await
            .expect("range");
        (catalog_state(catalog.clone()), catalog, small.id, large.id)
    }

    #[tokio::test]
    async fn list_filters_by_range() {
        let (state, _, small, large) = seeded().await;
        for (range, name) in [(small, "A"), (large, "B"), (small, "C")] {
            let (status, _) = create_nut(State(state.clone()), ApiJson(nut(range, name)))
                .await
                .expect("created");
            assert_eq!(status, StatusCode::CREATED);
        }

        let Json(all) = list_nuts(State(state.clone()), ApiQuery(NutListQuery::default()))
            .await
            .expect("list");
        assert_eq!(all.len(), 3);

        let Json(filtered) = list_nuts(
            State(state),
            ApiQuery(NutListQuery {
                range_id: Some(small),
            }),
        )
        .await
        .expect("filtered");
        assert_eq!(filtered.len(), 2);
        assert!(filtered.iter().all(|n| n.id_zakresu == small));
    }

    #[tokio::test]
    async fn create_requires_existing_range_and_positive_values() {
        let (state, catalog, small, _) = seeded().await;
        let err = create_nut(State(state.clone()), ApiJson(nut(999, "X")))
            .await
            .expect_err("unknown range");
        assert_eq!(err.status, StatusCode::NOT_FOUND);
        assert_eq!(err.detail.as_deref(), Some("Range not found"));

        let mut free = nut(small, "free");
        free.cena = 0.0;
        let err = create_nut(State(state), ApiJson(free))
            .await
            .expect_err("zero price");
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(catalog.nut_count().await, 0);
    }

    #[tokio::test]
    async fn prices_and_names_must_fit_storage() {
        let (state, catalog, small, _) = seeded().await;
        let mut cheap = nut(small, "cheap");
        cheap.cena = 0.001;
        let err = create_nut(State(state.clone()), ApiJson(cheap))
            .await
            .expect_err("rounds to zero");
        assert_eq!(err.status, StatusCode::BAD_REQUEST);

        let mut dear = nut(small, "dear");
        dear.cena = 1e8;
        let err = create_nut(State(state.clone()), ApiJson(dear))
            .await
            .expect_err("overflows numeric(10,2)");
        assert_eq!(err.status, StatusCode::BAD_REQUEST);

        let long_name = "n".repeat(101);
        let err = create_nut(State(state.clone()), ApiJson(nut(small, &long_name)))
            .await
            .expect_err("name too long");
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(catalog.nut_count().await, 0);

        let (_, Json(created)) = create_nut(State(state.clone()), ApiJson(nut(small, "ok")))
            .await
            .expect("created");
        let err = update_nut(
            State(state),
            ApiPath(created.id),
            ApiJson(NutUpdate {
                cena: Some(0.004),
                ..NutUpdate::default()
            }),
        )
        .await
        .expect_err("merged price rechecked");
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn update_rechecks_range_only_when_moved() {
        let (state, _, small, large) = seeded().await;
        let (_, Json(created)) = create_nut(State(state.clone()), ApiJson(nut(small, "A")))
            .await
            .expect("created");

        let err = update_nut(
            State(state.clone()),
            ApiPath(created.id),
            ApiJson(NutUpdate {
                id_zakresu: Some(999),
                ..NutUpdate::default()
            }),
        )
        .await
        .expect_err("unknown range");
        assert_eq!(err.status, StatusCode::NOT_FOUND);

        let Json(moved) = update_nut(
            State(state),
            ApiPath(created.id),
            ApiJson(NutUpdate {
                id_zakresu: Some(large),
                cena: Some(1.5),
                ..NutUpdate::default()
            }),
        )
        .await
        .expect("moved");
        assert_eq!(moved.id_zakresu, large);
        assert_eq!(moved.nazwa, "A");
    }

    #[tokio::test]
    async fn delete_and_missing_nut() {
        let (state, catalog, small, _) = seeded().await;
        let (_, Json(created)) = create_nut(State(state.clone()), ApiJson(nut(small, "A")))
            .await
            .expect("created");
        let status = delete_nut(State(state.clone()), ApiPath(created.id))
            .await
            .expect("deleted");
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert_eq!(catalog.nut_count().await, 0);

        let err = get_nut(State(state), ApiPath(created.id))
            .await
            .expect_err("gone");
        assert_eq!(err.detail.as_deref(), Some("Nut not found"));
    }
}
