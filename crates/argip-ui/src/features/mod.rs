//! Feature slices: pure state next to wasm-only views.
pub mod auth;
pub mod calculator;
#[cfg(target_arch = "wasm32")]
pub mod dashboard;
pub mod nuts;
pub mod ranges;
