//! Prometheus-backed metrics registry and snapshot helpers.
//!
//! # Design
//! - Encapsulates collector registration to keep the public API small.
//! - Request counts and latencies are keyed by matched route, never by raw path.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use prometheus::{Encoder, HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry, TextEncoder};
use serde::Serialize;

use crate::error::{Result, TelemetryError};

/// Prometheus-backed metrics registry shared across services.
#[derive(Clone)]
pub struct Metrics {
    inner: Arc<MetricsInner>,
}

struct MetricsInner {
    registry: Registry,
    http_requests_total: IntCounterVec,
    http_request_duration: HistogramVec,
    auth_failures_total: IntCounterVec,
    catalog_mutations_total: IntCounterVec,
    auth_failures_sum: AtomicU64,
    catalog_mutations_sum: AtomicU64,
}

/// Snapshot of selected counters for diagnostics.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct MetricsSnapshot {
    /// Rejected authentication attempts across all reasons.
    pub auth_failures_total: u64,
    /// Successful catalog writes across all entities.
    pub catalog_mutations_total: u64,
}

impl Metrics {
    /// Construct a new metrics registry with the standard collectors registered.
    ///
    /// # Errors
    ///
    /// Returns an error if any of the Prometheus collectors cannot be
    /// built or registered.
    pub fn new() -> Result<Self> {
        let registry = Registry::new();

        let http_requests_total = register_counter_vec(
            &registry,
            "http_requests_total",
            "Total HTTP requests received",
            &["route", "code"],
        )?;
        let http_request_duration = HistogramVec::new(
            HistogramOpts::new(
                "http_request_duration_seconds",
                "HTTP request latency by matched route",
            ),
            &["route"],
        )
        .map_err(|source| TelemetryError::metric_build("http_request_duration_seconds", source))?;
        registry
            .register(Box::new(http_request_duration.clone()))
            .map_err(|source| {
                TelemetryError::metric_register("http_request_duration_seconds", source)
            })?;
        let auth_failures_total = register_counter_vec(
            &registry,
            "auth_failures_total",
            "Rejected login or bearer token attempts by reason",
            &["reason"],
        )?;
        let catalog_mutations_total = register_counter_vec(
            &registry,
            "catalog_mutations_total",
            "Successful catalog writes by entity and action",
            &["entity", "action"],
        )?;

        Ok(Self {
            inner: Arc::new(MetricsInner {
                registry,
                http_requests_total,
                http_request_duration,
                auth_failures_total,
                catalog_mutations_total,
                auth_failures_sum: AtomicU64::new(0),
                catalog_mutations_sum: AtomicU64::new(0),
            }),
        })
    }

    /// Increment the HTTP request counter for the given route and status code.
    pub fn inc_http_request(&self, route: &str, status: u16) {
        self.inner
            .http_requests_total
            .with_label_values(&[route, &status.to_string()])
            .inc();
    }

    /// Record how long a request on `route` took.
    pub fn observe_http_latency(&self, route: &str, elapsed: Duration) {
        self.inner
            .http_request_duration
            .with_label_values(&[route])
            .observe(elapsed.as_secs_f64());
    }

    /// Increment the authentication failure counter.
    pub fn inc_auth_failure(&self, reason: &str) {
        self.inner
            .auth_failures_total
            .with_label_values(&[reason])
            .inc();
        self.inner.auth_failures_sum.fetch_add(1, Ordering::Relaxed);
    }

    /// Increment the catalog write counter, e.g. `("range", "create")`.
    pub fn inc_catalog_mutation(&self, entity: &str, action: &str) {
        self.inner
            .catalog_mutations_total
            .with_label_values(&[entity, action])
            .inc();
        self.inner
            .catalog_mutations_sum
            .fetch_add(1, Ordering::Relaxed);
    }

    /// Render the metrics registry using the Prometheus text exposition format.
    ///
    /// # Errors
    ///
    /// Returns an error if the metrics cannot be encoded or if the encoded
    /// buffer is not valid UTF-8.
    pub fn render(&self) -> Result<String> {
        let encoder = TextEncoder::new();
        let metric_families = self.inner.registry.gather();
        let mut buffer = Vec::new();
        encoder
            .encode(&metric_families, &mut buffer)
            .map_err(|source| TelemetryError::ScrapeEncode { source })?;
        String::from_utf8(buffer).map_err(|source| TelemetryError::ScrapeUtf8 { source })
    }

    /// Take a point-in-time snapshot of the aggregate counters.
    #[must_use]
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            auth_failures_total: self.inner.auth_failures_sum.load(Ordering::Relaxed),
            catalog_mutations_total: self.inner.catalog_mutations_sum.load(Ordering::Relaxed),
        }
    }
}

fn register_counter_vec(
    registry: &Registry,
    name: &'static str,
    help: &str,
    labels: &[&str],
) -> Result<IntCounterVec> {
    let counter = IntCounterVec::new(Opts::new(name, help), labels)
        .map_err(|source| TelemetryError::metric_build(name, source))?;
    registry
        .register(Box::new(counter.clone()))
        .map_err(|source| TelemetryError::metric_register(name, source))?;
    Ok(counter)
}
