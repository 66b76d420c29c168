//! Registration, login, logout, and profile endpoints.
//!
//! # Design
//! - Unknown users and wrong passwords share one 401 message.
//! - Duplicate checks run before hashing; a unique violation from a concurrent
//!   registration maps to the same 400 messages.
//! - Expired sessions are purged on each successful login.

use std::sync::Arc;

use argip_api_models::validation::{ensure_present, validate_email, validate_password};
use argip_api_models::{LoginRequest, RegisterRequest, TokenResponse, User};
use argip_data::{NewUser, SessionRecord};
use axum::{
    Json,
    extract::{Extension, State},
    http::StatusCode,
};
use chrono::{TimeDelta, Utc};
use tracing::{error, info, warn};

use crate::http::auth::AuthContext;
use crate::http::constants::{MSG_BAD_LOGIN, MSG_EMAIL_TAKEN, MSG_USERNAME_TAKEN};
use crate::http::credentials::{IssuedToken, hash_secret, reject_unknown_user, verify_secret};
use crate::http::errors::ApiError;
use crate::http::extract::ApiJson;
use crate::state::ApiState;

pub(crate) async fn register(
    State(state): State<Arc<ApiState>>,
    ApiJson(request): ApiJson<RegisterRequest>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    let username = request.username.trim();
    let email = request.email.trim();
    ensure_present("username", username)?;
    validate_email(email)?;
    validate_password(&request.password)?;

    let accounts = &state.accounts;
    if accounts
        .find_user_by_username(username)
        .await
        .map_err(|err| ApiError::storage(&err, "failed to check username"))?
        .is_some()
    {
        return Err(ApiError::bad_request(MSG_USERNAME_TAKEN));
    }
    if accounts
        .find_user_by_email(email)
        .await
        .map_err(|err| ApiError::storage(&err, "failed to check email"))?
        .is_some()
    {
        return Err(ApiError::bad_request(MSG_EMAIL_TAKEN));
    }

    let hashed_password = hash_secret(&request.password).map_err(|err| {
        error!(error = %err, "failed to hash password");
        ApiError::internal("failed to register user")
    })?;

    let record = accounts
        .insert_user(NewUser {
            username,
            email,
            hashed_password: &hashed_password,
        })
        .await
        .map_err(|err| match err.unique_violation() {
            Some(constraint) if constraint.contains("email") => {
                ApiError::bad_request(MSG_EMAIL_TAKEN)
            }
            Some(_) => ApiError::bad_request(MSG_USERNAME_TAKEN),
            None => ApiError::storage(&err, "failed to register user"),
        })?;

    info!(user_id = record.id, "user registered");
    Ok((StatusCode::CREATED, Json(record.to_user())))
}

pub(crate) async fn login(
    State(state): State<Arc<ApiState>>,
    ApiJson(request): ApiJson<LoginRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    let record = state
        .accounts
        .find_user_by_username(request.username.trim())
        .await
        .map_err(|err| ApiError::storage(&err, "failed to load user"))?;

    let authenticated = match &record {
        Some(record) => verify_secret(&record.hashed_password, &request.password).map_err(|err| {
            error!(error = %err, user_id = record.id, "stored password hash is unreadable");
            ApiError::internal("failed to verify credentials")
        })?,
        None => reject_unknown_user(&request.password),
    };
    let Some(user) = record.filter(|_| authenticated) else {
        state.telemetry.inc_auth_failure("bad_login");
        return Err(ApiError::unauthorized(MSG_BAD_LOGIN));
    };

    let now = Utc::now();
    match state.accounts.purge_expired_sessions(now).await {
        Ok(0) => {}
        Ok(purged) => info!(purged, "expired sessions purged"),
        Err(err) => warn!(error = %err, "failed to purge expired sessions"),
    }

    let ttl = TimeDelta::from_std(state.token_ttl)
        .map_err(|_| ApiError::internal("token lifetime is out of range"))?;
    let token = IssuedToken::mint();
    let secret_hash = hash_secret(&token.secret).map_err(|err| {
        error!(error = %err, "failed to hash session secret");
        ApiError::internal("failed to issue token")
    })?;
    state
        .accounts
        .insert_session(&SessionRecord {
            id: token.session_id,
            user_id: user.id,
            secret_hash,
            expires_at: now + ttl,
        })
        .await
        .map_err(|err| ApiError::storage(&err, "failed to issue token"))?;

    info!(user_id = user.id, session_id = %token.session_id, "session issued");
    Ok(Json(TokenResponse::bearer(token.encode())))
}

pub(crate) async fn logout(
    State(state): State<Arc<ApiState>>,
    Extension(context): Extension<AuthContext>,
) -> Result<StatusCode, ApiError> {
    state
        .accounts
        .delete_session(context.session_id)
        .await
        .map_err(|err| ApiError::storage(&err, "failed to revoke session"))?;
    info!(user_id = context.user.id, session_id = %context.session_id, "session revoked");
    Ok(StatusCode::NO_CONTENT)
}

pub(crate) async fn me(Extension(context): Extension<AuthContext>) -> Json<User> {
    Json(context.user)
}
