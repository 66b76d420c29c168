//! Typed runtime settings resolved from the process environment.
//!
//! # Design
//! - Parsing goes through an injectable lookup so tests never touch process env.
//! - Every failure names the variable that caused it.

use std::net::SocketAddr;
use std::time::Duration;

use tracing::debug;

use crate::defaults;
use crate::error::{ConfigError, ConfigResult};

/// Environment variable holding the Postgres connection string.
pub const ENV_DATABASE_URL: &str = "DATABASE_URL";
/// Environment variable holding the listen address.
pub const ENV_BIND_ADDR: &str = "ARGIP_BIND_ADDR";
/// Environment variable holding the token lifetime in minutes.
pub const ENV_TOKEN_TTL_MINUTES: &str = "ARGIP_TOKEN_TTL_MINUTES";
/// Environment variable holding comma-separated CORS origins.
pub const ENV_CORS_ORIGINS: &str = "ARGIP_CORS_ORIGINS";
/// Environment variable holding the log level.
pub const ENV_LOG_LEVEL: &str = "ARGIP_LOG_LEVEL";
/// Environment variable holding the log format (`json` or `pretty`).
pub const ENV_LOG_FORMAT: &str = "ARGIP_LOG_FORMAT";
/// Environment variable holding the pool size.
pub const ENV_DB_MAX_CONNECTIONS: &str = "ARGIP_DB_MAX_CONNECTIONS";

/// Requested log output format; `None` in [`AppSettings`] means "infer from build".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormatPreference {
    /// Structured JSON lines.
    Json,
    /// Human-readable output.
    Pretty,
}

/// Fully resolved server settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppSettings {
    /// Postgres connection string.
    pub database_url: String,
    /// Listen address for the HTTP API.
    pub bind_addr: SocketAddr,
    /// Lifetime of issued bearer tokens.
    pub token_ttl: Duration,
    /// Origins allowed by the CORS layer.
    pub cors_origins: Vec<String>,
    /// Log level directive.
    pub log_level: String,
    /// Explicit log format, when configured.
    pub log_format: Option<LogFormatPreference>,
    /// Maximum pooled database connections.
    pub db_max_connections: u32,
}

impl AppSettings {
    /// Resolve settings from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingEnv`] when `DATABASE_URL` is absent, or
    /// [`ConfigError::InvalidValue`] when a variable cannot be parsed.
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolve settings through the supplied lookup function.
    ///
    /// # Errors
    ///
    /// See [`AppSettings::from_env`].
    pub fn from_lookup<F>(lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let database_url = read(ENV_DATABASE_URL).ok_or(ConfigError::MissingEnv {
            name: ENV_DATABASE_URL,
        })?;

        let bind_addr = match read(ENV_BIND_ADDR) {
            Some(raw) => raw.parse().map_err(|_| ConfigError::InvalidValue {
                name: ENV_BIND_ADDR,
                value: raw,
                reason: "expected host:port",
            })?,
            None => defaults::BIND_ADDR
                .parse()
                .map_err(|_| ConfigError::InvalidValue {
                    name: ENV_BIND_ADDR,
                    value: defaults::BIND_ADDR.to_string(),
                    reason: "expected host:port",
                })?,
        };

        let ttl_minutes = match read(ENV_TOKEN_TTL_MINUTES) {
            Some(raw) => parse_positive_u64(ENV_TOKEN_TTL_MINUTES, raw)?,
            None => defaults::TOKEN_TTL_MINUTES,
        };

        let cors_origins = read(ENV_CORS_ORIGINS).map_or_else(
            || {
                defaults::CORS_ORIGINS
                    .iter()
                    .map(ToString::to_string)
                    .collect()
            },
            |raw| split_origins(&raw),
        );

        let log_level = read(ENV_LOG_LEVEL).unwrap_or_else(|| defaults::LOG_LEVEL.to_string());

        let log_format = read(ENV_LOG_FORMAT)
            .map(|raw| match raw.to_ascii_lowercase().as_str() {
                "json" => Ok(LogFormatPreference::Json),
                "pretty" => Ok(LogFormatPreference::Pretty),
                _ => Err(ConfigError::InvalidValue {
                    name: ENV_LOG_FORMAT,
                    value: raw,
                    reason: "expected json or pretty",
                }),
            })
            .transpose()?;

        let db_max_connections = match read(ENV_DB_MAX_CONNECTIONS) {
            Some(raw) => {
                let value = parse_positive_u64(ENV_DB_MAX_CONNECTIONS, raw.clone())?;
                u32::try_from(value).map_err(|_| ConfigError::InvalidValue {
                    name: ENV_DB_MAX_CONNECTIONS,
                    value: raw,
                    reason: "value out of range",
                })?
            }
            None => defaults::DB_MAX_CONNECTIONS,
        };

        let settings = Self {
            database_url,
            bind_addr,
            token_ttl: Duration::from_secs(ttl_minutes.saturating_mul(60)),
            cors_origins,
            log_level,
            log_format,
            db_max_connections,
        };
        debug!(
            bind_addr = %settings.bind_addr,
            token_ttl_secs = settings.token_ttl.as_secs(),
            cors_origins = settings.cors_origins.len(),
            "resolved application settings"
        );
        Ok(settings)
    }
}

fn parse_positive_u64(name: &'static str, raw: String) -> ConfigResult<u64> {
    match raw.parse::<u64>() {
        Ok(0) => Err(ConfigError::InvalidValue {
            name,
            value: raw,
            reason: "must be greater than zero",
        }),
        Ok(value) => Ok(value),
        Err(_) => Err(ConfigError::InvalidValue {
            name,
            value: raw,
            reason: "expected a positive integer",
        }),
    }
}

fn split_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(ToString::to_string)
        .collect()
}
