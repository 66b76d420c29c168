//! Storage facades consumed by the HTTP handlers.
//!
//! # Design
//! - Handlers see only these traits, so tests swap in in-memory stubs.
//! - `PgStore` is the production implementation of both.

use std::sync::Arc;

use argip_api_models::{Nut, NutCreate, Range, RangeCreate, ScrewLength, ScrewLengthCreate};
use argip_data::{DataResult, NewUser, PgStore, SessionRecord, UserRecord};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Accounts and bearer sessions.
#[async_trait]
pub trait AccountFacade: Send + Sync {
    /// Confirm the backing store answers.
    async fn ping(&self) -> DataResult<()>;
    /// Look up an account by login name.
    async fn find_user_by_username(&self, username: &str) -> DataResult<Option<UserRecord>>;
    /// Look up an account by e-mail address.
    async fn find_user_by_email(&self, email: &str) -> DataResult<Option<UserRecord>>;
    /// Look up an account by identifier.
    async fn find_user(&self, id: i64) -> DataResult<Option<UserRecord>>;
    /// Create an account.
    async fn insert_user(&self, user: NewUser<'_>) -> DataResult<UserRecord>;
    /// Persist a freshly minted session.
    async fn insert_session(&self, session: &SessionRecord) -> DataResult<()>;
    /// Fetch a session by identifier.
    async fn find_session(&self, id: Uuid) -> DataResult<Option<SessionRecord>>;
    /// Revoke a session.
    async fn delete_session(&self, id: Uuid) -> DataResult<bool>;
    /// Drop sessions that expired at or before `now`.
    async fn purge_expired_sessions(&self, now: DateTime<Utc>) -> DataResult<u64>;
}

/// Ranges, nuts, and screw lengths.
#[async_trait]
pub trait CatalogFacade: Send + Sync {
    /// All ranges ordered by id.
    async fn list_ranges(&self) -> DataResult<Vec<Range>>;
    /// A single range.
    async fn get_range(&self, id: i64) -> DataResult<Option<Range>>;
    /// Create a range.
    async fn insert_range(&self, range: &RangeCreate) -> DataResult<Range>;
    /// Overwrite a range.
    async fn update_range(&self, id: i64, range: &RangeCreate) -> DataResult<Option<Range>>;
    /// Delete a range and its nuts.
    async fn delete_range(&self, id: i64) -> DataResult<bool>;
    /// Nuts, optionally for one range.
    async fn list_nuts(&self, range_id: Option<i64>) -> DataResult<Vec<Nut>>;
    /// A single nut.
    async fn get_nut(&self, id: i64) -> DataResult<Option<Nut>>;
    /// Create a nut.
    async fn insert_nut(&self, nut: &NutCreate) -> DataResult<Nut>;
    /// Overwrite a nut.
    async fn update_nut(&self, id: i64, nut: &NutCreate) -> DataResult<Option<Nut>>;
    /// Delete a nut.
    async fn delete_nut(&self, id: i64) -> DataResult<bool>;
    /// Screw lengths ordered by diameter, then length.
    async fn list_screw_lengths(&self) -> DataResult<Vec<ScrewLength>>;
    /// Whether the diameter/length pair exists.
    async fn screw_length_exists(&self, srednica: f64, dlugosc: f64) -> DataResult<bool>;
    /// Create a screw length.
    async fn insert_screw_length(&self, screw: &ScrewLengthCreate) -> DataResult<ScrewLength>;
    /// Delete a screw length.
    async fn delete_screw_length(&self, id: i64) -> DataResult<bool>;
}

/// Shared reference to the account backend.
pub type SharedAccounts = Arc<dyn AccountFacade>;
/// Shared reference to the catalog backend.
pub type SharedCatalog = Arc<dyn CatalogFacade>;

#[async_trait]
impl AccountFacade for PgStore {
    async fn ping(&self) -> DataResult<()> {
        Self::ping(self).await
    }

    async fn find_user_by_username(&self, username: &str) -> DataResult<Option<UserRecord>> {
        Self::find_user_by_username(self, username).await
    }

    async fn find_user_by_email(&self, email: &str) -> DataResult<Option<UserRecord>> {
        Self::find_user_by_email(self, email).await
    }

    async fn find_user(&self, id: i64) -> DataResult<Option<UserRecord>> {
        Self::find_user(self, id).await
    }

    async fn insert_user(&self, user: NewUser<'_>) -> DataResult<UserRecord> {
        Self::insert_user(self, user).await
    }

    async fn insert_session(&self, session: &SessionRecord) -> DataResult<()> {
        Self::insert_session(self, session).await
    }

    async fn find_session(&self, id: Uuid) -> DataResult<Option<SessionRecord>> {
        Self::find_session(self, id).await
    }

    async fn delete_session(&self, id: Uuid) -> DataResult<bool> {
        Self::delete_session(self, id).await
    }

    async fn purge_expired_sessions(&self, now: DateTime<Utc>) -> DataResult<u64> {
        Self::purge_expired_sessions(self, now).await
    }
}

#[async_trait]
impl CatalogFacade for PgStore {
    async fn list_ranges(&self) -> DataResult<Vec<Range>> {
        Self::list_ranges(self).await
    }

    async fn get_range(&self, id: i64) -> DataResult<Option<Range>> {
        Self::get_range(self, id).await
    }

    async fn insert_range(&self, range: &RangeCreate) -> DataResult<Range> {
        Self::insert_range(self, range).await
    }

    async fn update_range(&self, id: i64, range: &RangeCreate) -> DataResult<Option<Range>> {
        Self::update_range(self, id, range).await
    }

    async fn delete_range(&self, id: i64) -> DataResult<bool> {
        Self::delete_range(self, id).await
    }

    async fn list_nuts(&self, range_id: Option<i64>) -> DataResult<Vec<Nut>> {
        Self::list_nuts(self, range_id).await
    }

    async fn get_nut(&self, id: i64) -> DataResult<Option<Nut>> {
        Self::get_nut(self, id).await
    }

    async fn insert_nut(&self, nut: &NutCreate) -> DataResult<Nut> {
        Self::insert_nut(self, nut).await
    }

    async fn update_nut(&self, id: i64, nut: &NutCreate) -> DataResult<Option<Nut>> {
        Self::update_nut(self, id, nut).await
    }

    async fn delete_nut(&self, id: i64) -> DataResult<bool> {
        Self::delete_nut(self, id).await
    }

    async fn list_screw_lengths(&self) -> DataResult<Vec<ScrewLength>> {
        Self::list_screw_lengths(self).await
    }

    async fn screw_length_exists(&self, srednica: f64, dlugosc: f64) -> DataResult<bool> {
        Self::screw_length_exists(self, srednica, dlugosc).await
    }

    async fn insert_screw_length(&self, screw: &ScrewLengthCreate) -> DataResult<ScrewLength> {
        Self::insert_screw_length(self, screw).await
    }

    async fn delete_screw_length(&self, id: i64) -> DataResult<bool> {
        Self::delete_screw_length(self, id).await
    }
}
