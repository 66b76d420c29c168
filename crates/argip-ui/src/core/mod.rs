//! Core, DOM-free primitives shared by every view.
pub mod confirm;
pub mod failure;
pub mod guard;
pub mod session;
pub mod store;
pub mod view_state;
