#![forbid(unsafe_code)]
#![deny(
    warnings,
    dead_code,
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]

//! Telemetry primitives shared across the Argip workspace.
//!
//! Layout: `init.rs` (subscriber setup), `context.rs` (app span and request
//! context), `layers.rs` (request-id layers), `metrics.rs` (Prometheus
//! registry), `error.rs` (`TelemetryError`).

pub mod context;
pub mod error;
pub mod init;
pub mod layers;
pub mod metrics;

pub use context::{GlobalContextGuard, current_request_id, scope_request};
pub use error::{MetricStage, Result, TelemetryError};
pub use init::{DEFAULT_LOG_LEVEL, LogFormat, LoggingConfig, build_sha, init_logging};
pub use layers::{REQUEST_ID_HEADER, request_id_layers};
pub use metrics::{Metrics, MetricsSnapshot};
