//! Shared components used across routes.
pub(crate) mod alert;
pub(crate) mod form;
pub(crate) mod guard;
pub(crate) mod locale_toggle;
pub(crate) mod not_found;
pub(crate) mod shell;
