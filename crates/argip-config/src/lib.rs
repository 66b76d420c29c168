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

//! Environment-driven configuration for the Argip server.
//!
//! Layout: `settings.rs` (typed `AppSettings` and the env parser), `defaults.rs`
//! (fallback values), `error.rs` (`ConfigError`).

mod defaults;
pub mod error;
pub mod settings;

pub use error::{ConfigError, ConfigResult};
pub use settings::{AppSettings, LogFormatPreference};
