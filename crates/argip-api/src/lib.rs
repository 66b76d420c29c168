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

//! HTTP API for Argip.
//!
//! Layout: `facade.rs` (storage traits handlers depend on), `state.rs`
//! (shared handler state), `error.rs` (server lifecycle errors), `http/`
//! (router, middleware, handlers, problem responses).

pub mod error;
pub mod facade;
pub mod http;
pub mod state;

pub use error::{ApiServerError, ApiServerResult};
pub use facade::{AccountFacade, CatalogFacade};
pub use http::router::ApiServer;
pub use state::ApiState;

#[cfg(test)]
mod test_support;
