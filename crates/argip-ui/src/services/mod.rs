//! Browser-bound services: HTTP transport and storage.
pub(crate) mod api;
pub(crate) mod storage;
