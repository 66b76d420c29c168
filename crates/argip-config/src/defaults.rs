//! Default values applied when an environment variable is absent.
//!
//! # Design
//! - Keep every fallback in one place so the server and docs agree.

/// Listen address for the HTTP API.
pub(crate) const BIND_ADDR: &str = "0.0.0.0:8000";
/// Bearer token lifetime in minutes.
pub(crate) const TOKEN_TTL_MINUTES: u64 = 30;
/// Browser origins allowed by CORS (development servers).
pub(crate) const CORS_ORIGINS: &[&str] = &["http://localhost:3000", "http://localhost:5173"];
/// Log level used when neither `RUST_LOG` nor `ARGIP_LOG_LEVEL` is set.
pub(crate) const LOG_LEVEL: &str = "info";
/// Connection pool ceiling.
pub(crate) const DB_MAX_CONNECTIONS: u32 = 10;
