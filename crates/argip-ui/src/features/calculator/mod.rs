//! Screw length calculator and reference list.

pub mod state;
#[cfg(target_arch = "wasm32")]
pub mod view;
