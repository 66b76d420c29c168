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

//! Postgres data access layer for Argip: migrations and repositories.
//!
//! Layout: `store.rs` (`PgStore` + migrations), `accounts.rs` (users and
//! sessions), `catalog.rs` (ranges, nuts, screw lengths), `error.rs`.

pub mod accounts;
pub mod catalog;
pub mod error;
pub mod store;

pub use accounts::{NewUser, SessionRecord, UserRecord};
pub use error::{DataError, Result as DataResult};
pub use store::PgStore;
