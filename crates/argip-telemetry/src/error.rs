//! Failures raised while wiring logging or the metrics registry.

use std::string::FromUtf8Error;

use prometheus::Error as PrometheusError;
use thiserror::Error;
use tracing_subscriber::util::TryInitError;

/// Result alias for telemetry operations.
pub type Result<T> = std::result::Result<T, TelemetryError>;

/// Point in a collector's setup that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricStage {
    /// Building the collector from its options.
    Build,
    /// Adding the collector to the registry.
    Register,
}

impl MetricStage {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Build => "build",
            Self::Register => "register",
        }
    }
}

/// Errors raised by telemetry helpers.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// A global subscriber was already installed.
    #[error("failed to install tracing subscriber")]
    SubscriberInstall {
        /// Underlying tracing subscriber error.
        #[source]
        source: TryInitError,
    },
    /// A collector could not be built or registered at startup.
    #[error("failed to {} metric {name}", stage.as_str())]
    Metric {
        /// Metric name.
        name: &'static str,
        /// Setup step that failed.
        stage: MetricStage,
        /// Underlying Prometheus error.
        #[source]
        source: PrometheusError,
    },
    /// The `/metrics` scrape could not be encoded.
    #[error("failed to encode metrics scrape")]
    ScrapeEncode {
        /// Underlying Prometheus error.
        #[source]
        source: PrometheusError,
    },
    /// The encoded scrape was not UTF-8.
    #[error("metrics scrape was not valid utf-8")]
    ScrapeUtf8 {
        /// Underlying conversion error.
        #[source]
        source: FromUtf8Error,
    },
}

impl TelemetryError {
    pub(crate) const fn metric_build(name: &'static str, source: PrometheusError) -> Self {
        Self::Metric {
            name,
            stage: MetricStage::Build,
            source,
        }
    }

    pub(crate) const fn metric_register(name: &'static str, source: PrometheusError) -> Self {
        Self::Metric {
            name,
            stage: MetricStage::Register,
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use super::*;

    #[test]
    fn metric_errors_name_the_collector_and_step() {
        let build = TelemetryError::metric_build(
            "auth_failures_total",
            PrometheusError::Msg("bad opts".to_string()),
        );
        assert_eq!(build.to_string(), "failed to build metric auth_failures_total");
        assert!(build.source().is_some());

        let register = TelemetryError::metric_register("auth_failures_total", PrometheusError::AlreadyReg);
        assert_eq!(
            register.to_string(),
            "failed to register metric auth_failures_total"
        );
        assert!(matches!(
            register,
            TelemetryError::Metric {
                stage: MetricStage::Register,
                ..
            }
        ));
    }

    #[test]
    fn scrape_failures_keep_their_source() {
        let source = String::from_utf8(vec![0xff, 0xfe]).expect_err("invalid utf-8");
        let err = TelemetryError::ScrapeUtf8 { source };
        assert_eq!(err.to_string(), "metrics scrape was not valid utf-8");
        assert!(err.source().is_some());
    }
}
