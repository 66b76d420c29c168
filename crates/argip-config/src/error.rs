//! Error types for settings resolution.

use thiserror::Error;

/// Primary error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required environment variable was not set.
    #[error("missing required environment variable")]
    MissingEnv {
        /// Variable name.
        name: &'static str,
    },
    /// A variable was set to a value that could not be parsed.
    #[error("invalid configuration value")]
    InvalidValue {
        /// Variable name.
        name: &'static str,
        /// Offending value.
        value: String,
        /// Machine-readable reason for the failure.
        reason: &'static str,
    },
}

/// Convenience alias for configuration results.
pub type ConfigResult<T> = Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_messages_are_constant() {
        let missing = ConfigError::MissingEnv {
            name: "DATABASE_URL",
        };
        assert_eq!(missing.to_string(), "missing required environment variable");

        let invalid = ConfigError::InvalidValue {
            name: "ARGIP_BIND_ADDR",
            value: "nope".to_string(),
            reason: "expected host:port",
        };
        assert_eq!(invalid.to_string(), "invalid configuration value");
        assert!(matches!(
            invalid,
            ConfigError::InvalidValue {
                name: "ARGIP_BIND_ADDR",
                ..
            }
        ));
    }
}
