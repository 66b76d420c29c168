//! Extractors whose rejections render as problem responses.

use axum::extract::{FromRequest, FromRequestParts, Json, Path, Query};

use crate::http::errors::ApiError;

/// JSON body; malformed or incomplete payloads become a 400 problem.
#[derive(Debug, FromRequest)]
#[from_request(via(Json), rejection(ApiError))]
pub(crate) struct ApiJson<T>(pub(crate) T);

/// Query string; unparsable parameters become a 400 problem.
#[derive(Debug, FromRequestParts)]
#[from_request(via(Query), rejection(ApiError))]
pub(crate) struct ApiQuery<T>(pub(crate) T);

/// Path parameters; non-numeric ids become a 400 problem.
#[derive(Debug, FromRequestParts)]
#[from_request(via(Path), rejection(ApiError))]
pub(crate) struct ApiPath<T>(pub(crate) T);
