//! Bearer authentication middleware.
//!
//! # Design
//! - Every rejection renders the same 401 so callers cannot probe which check failed.
//! - The failing check is still recorded as a metric label and a debug event.

use std::sync::Arc;

use argip_api_models::User;
use axum::{
    extract::State,
    http::{HeaderMap, Request, header::AUTHORIZATION},
    middleware::Next,
    response::Response,
};
use chrono::Utc;
use tracing::{debug, error, warn};
use uuid::Uuid;

use crate::http::constants::MSG_INVALID_CREDENTIALS;
use crate::http::credentials::{parse_token, verify_secret};
use crate::http::errors::ApiError;
use crate::state::ApiState;

/// Authenticated caller, inserted into request extensions by [`require_bearer`].
#[derive(Debug, Clone)]
pub(crate) struct AuthContext {
    pub(crate) user: User,
    pub(crate) session_id: Uuid,
}

pub(crate) async fn require_bearer(
    State(state): State<Arc<ApiState>>,
    mut req: Request<axum::body::Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let context = authenticate_bearer(&state, req.headers()).await?;
    req.extensions_mut().insert(context);
    Ok(next.run(req).await)
}

pub(crate) async fn authenticate_bearer(
    state: &ApiState,
    headers: &HeaderMap,
) -> Result<AuthContext, ApiError> {
    let token = extract_bearer(headers).ok_or_else(|| reject(state, "missing"))?;
    let (session_id, secret) = parse_token(token).ok_or_else(|| reject(state, "malformed"))?;

    let session = state
        .accounts
        .find_session(session_id)
        .await
        .map_err(|err| ApiError::storage(&err, "failed to load session"))?
        .ok_or_else(|| reject(state, "unknown_session"))?;

    if session.is_expired(Utc::now()) {
        if let Err(err) = state.accounts.delete_session(session_id).await {
            warn!(error = %err, %session_id, "failed to drop expired session");
        }
        return Err(reject(state, "expired"));
    }

    let matches = verify_secret(&session.secret_hash, secret).map_err(|err| {
        error!(error = %err, %session_id, "stored session hash is unreadable");
        ApiError::internal("failed to verify credentials")
    })?;
    if !matches {
        return Err(reject(state, "secret_mismatch"));
    }

    let user = state
        .accounts
        .find_user(session.user_id)
        .await
        .map_err(|err| ApiError::storage(&err, "failed to load user"))?
        .ok_or_else(|| reject(state, "unknown_user"))?;

    Ok(AuthContext {
        user: user.to_user(),
        session_id,
    })
}

/// Token from an `Authorization: Bearer <token>` header; the scheme is case-insensitive.
pub(crate) fn extract_bearer(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?.trim();
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

fn reject(state: &ApiState, reason: &'static str) -> ApiError {
    debug!(reason, "bearer authentication rejected");
    state.telemetry.inc_auth_failure(reason);
    ApiError::unauthorized(MSG_INVALID_CREDENTIALS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::credentials::{IssuedToken, hash_secret};
    use crate::test_support::{StubAccounts, state_with};
    use argip_data::SessionRecord;
    use axum::http::{HeaderValue, StatusCode};
    use chrono::Duration;

    fn bearer(token: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {token}")).expect("header"),
        );
        headers
    }

    #[test]
    fn bearer_scheme_is_case_insensitive() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("bEaReR abc"));
        assert_eq!(extract_bearer(&headers), Some("abc"));

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Basic abc"));
        assert_eq!(extract_bearer(&headers), None);

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer   "));
        assert_eq!(extract_bearer(&headers), None);
    }

    async fn seeded(expires_in: Duration) -> (StubAccounts, String) {
        let accounts = StubAccounts::default();
        let user = accounts.seed_user("jan", "jan@example.pl", "haslo123").await;
        let token = IssuedToken::mint();
        accounts
            .seed_session(SessionRecord {
                id: token.session_id,
                user_id: user.id,
                secret_hash: hash_secret(&token.secret).expect("hash"),
                expires_at: Utc::now() + expires_in,
            })
            .await;
        (accounts, token.encode())
    }

    #[tokio::test]
    async fn valid_token_yields_context() {
        let (accounts, token) = seeded(Duration::minutes(5)).await;
        let state = state_with(accounts);
        let context = authenticate_bearer(&state, &bearer(&token))
            .await
            .expect("authenticated");
        assert_eq!(context.user.username, "jan");
        assert_eq!(state.telemetry.snapshot().auth_failures_total, 0);
    }

    #[tokio::test]
    async fn expired_token_is_rejected_and_dropped() {
        let (accounts, token) = seeded(Duration::minutes(-1)).await;
        let state = state_with(accounts.clone());
        let err = authenticate_bearer(&state, &bearer(&token))
            .await
            .expect_err("expired");
        assert_eq!(err.status, StatusCode::UNAUTHORIZED);
        assert_eq!(err.detail.as_deref(), Some(MSG_INVALID_CREDENTIALS));
        assert_eq!(accounts.session_count().await, 0);
        assert_eq!(state.telemetry.snapshot().auth_failures_total, 1);
    }

    #[tokio::test]
    async fn tampered_secret_is_rejected() {
        let (accounts, token) = seeded(Duration::minutes(5)).await;
        let state = state_with(accounts);
        let tampered = format!("{token}x");
        let err = authenticate_bearer(&state, &bearer(&tampered))
            .await
            .expect_err("mismatch");
        assert_eq!(err.status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn missing_and_malformed_tokens_are_rejected() {
        let state = state_with(StubAccounts::default());
        let missing = authenticate_bearer(&state, &HeaderMap::new())
            .await
            .expect_err("missing");
        assert_eq!(missing.status, StatusCode::UNAUTHORIZED);

        let malformed = authenticate_bearer(&state, &bearer("garbage"))
            .await
            .expect_err("malformed");
        assert_eq!(malformed.status, StatusCode::UNAUTHORIZED);
        assert_eq!(state.telemetry.snapshot().auth_failures_total, 2);
    }
}
