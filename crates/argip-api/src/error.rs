//! # Design
//!
//! - One crate-level error for server construction, bind, and serve failures.
//! - Keep error messages constant; capture operational context in structured fields.

use std::error::Error;
use std::fmt::{self, Display, Formatter};
use std::net::SocketAddr;

/// Result alias for API server operations.
pub type ApiServerResult<T> = std::result::Result<T, ApiServerError>;

/// Errors raised while building, binding, or serving the API.
#[derive(Debug)]
pub enum ApiServerError {
    /// A configured CORS origin is not a valid header value.
    CorsOrigin {
        /// Offending origin as configured.
        origin: String,
        /// Header parse failure.
        source: axum::http::header::InvalidHeaderValue,
    },
    /// Binding the API listener failed.
    Bind {
        /// Address attempted.
        addr: SocketAddr,
        /// Underlying IO error.
        source: std::io::Error,
    },
    /// Serving the API failed.
    Serve {
        /// Underlying IO error.
        source: std::io::Error,
    },
}

impl Display for ApiServerError {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::CorsOrigin { .. } => formatter.write_str("invalid cors origin"),
            Self::Bind { .. } => formatter.write_str("failed to bind api listener"),
            Self::Serve { .. } => formatter.write_str("api server terminated unexpectedly"),
        }
    }
}

impl Error for ApiServerError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::CorsOrigin { source, .. } => Some(source),
            Self::Bind { source, .. } | Self::Serve { source } => Some(source),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn display_is_constant_and_source_is_kept() -> Result<(), Box<dyn Error>> {
        let bind = ApiServerError::Bind {
            addr: "127.0.0.1:8000".parse()?,
            source: io::Error::new(io::ErrorKind::AddrInUse, "busy"),
        };
        assert_eq!(bind.to_string(), "failed to bind api listener");
        assert!(bind.source().is_some());

        let serve = ApiServerError::Serve {
            source: io::Error::new(io::ErrorKind::BrokenPipe, "lost"),
        };
        assert_eq!(serve.to_string(), "api server terminated unexpectedly");
        assert!(serve.source().is_some());

        let Err(source) = axum::http::HeaderValue::from_str("http://bad\norigin") else {
            return Err("newline should be rejected".into());
        };
        let cors = ApiServerError::CorsOrigin {
            origin: "http://bad\norigin".to_string(),
            source,
        };
        assert_eq!(cors.to_string(), "invalid cors origin");
        assert!(cors.source().is_some());
        Ok(())
    }
}
