//! HTTP surface modules (router, middleware, handlers).

/// Bearer authentication middleware.
pub(crate) mod auth;
/// Shared constants: headers, problem URIs, token shape.
pub(crate) mod constants;
/// Password and token hashing helpers.
pub(crate) mod credentials;
/// Problem response type.
pub(crate) mod errors;
/// Extractors that reject with problem responses.
pub(crate) mod extract;
/// Service banner, health, and metrics endpoints.
pub(crate) mod health;
/// Nut handlers.
pub(crate) mod nuts;
/// Range handlers.
pub(crate) mod ranges;
/// Router construction and server host.
pub mod router;
/// Screw length handlers.
pub(crate) mod screw_lengths;
/// Registration, login, logout, and profile handlers.
pub(crate) mod session;
/// Metrics middleware for HTTP requests.
pub(crate) mod telemetry;
