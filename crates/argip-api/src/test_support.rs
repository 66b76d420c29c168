//! In-memory facade stubs shared by handler tests.

use std::sync::Arc;
use std::time::Duration;

use argip_api_models::{Nut, NutCreate, Range, RangeCreate, ScrewLength, ScrewLengthCreate};
use argip_data::{DataError, DataResult, NewUser, SessionRecord, UserRecord};
use argip_telemetry::Metrics;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::facade::{AccountFacade, CatalogFacade};
use crate::http::credentials::hash_secret;
use crate::state::ApiState;

fn unavailable() -> DataError {
    DataError::QueryFailed {
        operation: "stub",
        source: sqlx::Error::PoolTimedOut,
    }
}

#[derive(Default)]
struct AccountsInner {
    users: Vec<UserRecord>,
    sessions: Vec<SessionRecord>,
    down: bool,
}

#[derive(Clone, Default)]
pub(crate) struct StubAccounts {
    inner: Arc<Mutex<AccountsInner>>,
}

impl StubAccounts {
    pub(crate) fn offline() -> Self {
        let stub = Self::default();
        if let Ok(mut inner) = stub.inner.try_lock() {
            inner.down = true;
        }
        stub
    }

    pub(crate) async fn seed_user(&self, username: &str, email: &str, password: &str) -> UserRecord {
        let hashed = hash_secret(password).expect("hash password");
        self.insert_user(NewUser {
            username,
            email,
            hashed_password: &hashed,
        })
        .await
        .expect("seed user")
    }

    pub(crate) async fn seed_session(&self, session: SessionRecord) {
        self.inner.lock().await.sessions.push(session);
    }

    pub(crate) async fn session_count(&self) -> usize {
        self.inner.lock().await.sessions.len()
    }

    pub(crate) async fn sessions(&self) -> Vec<SessionRecord> {
        self.inner.lock().await.sessions.clone()
    }
}

#[async_trait]
impl AccountFacade for StubAccounts {
    async fn ping(&self) -> DataResult<()> {
        if self.inner.lock().await.down {
            return Err(unavailable());
        }
        Ok(())
    }

    async fn find_user_by_username(&self, username: &str) -> DataResult<Option<UserRecord>> {
        let inner = self.inner.lock().await;
        Ok(inner.users.iter().find(|u| u.username == username).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> DataResult<Option<UserRecord>> {
        let inner = self.inner.lock().await;
        Ok(inner.users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_user(&self, id: i64) -> DataResult<Option<UserRecord>> {
        let inner = self.inner.lock().await;
        Ok(inner.users.iter().find(|u| u.id == id).cloned())
    }

    async fn insert_user(&self, user: NewUser<'_>) -> DataResult<UserRecord> {
        let mut inner = self.inner.lock().await;
        let record = UserRecord {
            id: i64::try_from(inner.users.len()).unwrap_or_default() + 1,
            username: user.username.to_string(),
            email: user.email.to_string(),
            hashed_password: user.hashed_password.to_string(),
        };
        inner.users.push(record.clone());
        Ok(record)
    }

    async fn insert_session(&self, session: &SessionRecord) -> DataResult<()> {
        self.inner.lock().await.sessions.push(session.clone());
        Ok(())
    }

    async fn find_session(&self, id: Uuid) -> DataResult<Option<SessionRecord>> {
        let inner = self.inner.lock().await;
        Ok(inner.sessions.iter().find(|s| s.id == id).cloned())
    }

    async fn delete_session(&self, id: Uuid) -> DataResult<bool> {
        let mut inner = self.inner.lock().await;
        let before = inner.sessions.len();
        inner.sessions.retain(|s| s.id != id);
        Ok(inner.sessions.len() != before)
    }

    async fn purge_expired_sessions(&self, now: DateTime<Utc>) -> DataResult<u64> {
        let mut inner = self.inner.lock().await;
        let before = inner.sessions.len();
        inner.sessions.retain(|s| !s.is_expired(now));
        Ok(u64::try_from(before - inner.sessions.len()).unwrap_or_default())
    }
}

#[derive(Default)]
struct CatalogInner {
    ranges: Vec<Range>,
    nuts: Vec<Nut>,
    screws: Vec<ScrewLength>,
    next_id: i64,
}

impl CatalogInner {
    fn next(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

#[derive(Clone, Default)]
pub(crate) struct StubCatalog {
    inner: Arc<Mutex<CatalogInner>>,
}

impl StubCatalog {
    pub(crate) async fn nut_count(&self) -> usize {
        self.inner.lock().await.nuts.len()
    }

    pub(crate) async fn screw_count(&self) -> usize {
        self.inner.lock().await.screws.len()
    }
}

#[async_trait]
impl CatalogFacade for StubCatalog {
    async fn list_ranges(&self) -> DataResult<Vec<Range>> {
        Ok(self.inner.lock().await.ranges.clone())
    }

    async fn get_range(&self, id: i64) -> DataResult<Option<Range>> {
        let inner = self.inner.lock().await;
        Ok(inner.ranges.iter().find(|r| r.id == id).cloned())
    }

    async fn insert_range(&self, range: &RangeCreate) -> DataResult<Range> {
        let mut inner = self.inner.lock().await;
        let created = Range {
            id: inner.next(),
            nazwa: range.nazwa.trim().to_string(),
            od: range.od,
            do_: range.do_,
        };
        inner.ranges.push(created.clone());
        Ok(created)
    }

    async fn update_range(&self, id: i64, range: &RangeCreate) -> DataResult<Option<Range>> {
        let mut inner = self.inner.lock().await;
        Ok(inner.ranges.iter_mut().find(|r| r.id == id).map(|current| {
            current.nazwa = range.nazwa.trim().to_string();
            current.od = range.od;
            current.do_ = range.do_;
            current.clone()
        }))
    }

    async fn delete_range(&self, id: i64) -> DataResult<bool> {
        let mut inner = self.inner.lock().await;
        let before = inner.ranges.len();
        inner.ranges.retain(|r| r.id != id);
        inner.nuts.retain(|n| n.id_zakresu != id);
        Ok(inner.ranges.len() != before)
    }

    async fn list_nuts(&self, range_id: Option<i64>) -> DataResult<Vec<Nut>> {
        let inner = self.inner.lock().await;
        Ok(inner
            .nuts
            .iter()
            .filter(|n| range_id.is_none_or(|id| n.id_zakresu == id))
            .cloned()
            .collect())
    }

    async fn get_nut(&self, id: i64) -> DataResult<Option<Nut>> {
        let inner = self.inner.lock().await;
        Ok(inner.nuts.iter().find(|n| n.id == id).cloned())
    }

    async fn insert_nut(&self, nut: &NutCreate) -> DataResult<Nut> {
        let mut inner = self.inner.lock().await;
        let created = Nut {
            id: inner.next(),
            id_zakresu: nut.id_zakresu,
            nazwa: nut.nazwa.trim().to_string(),
            srednica: nut.srednica,
            cena: nut.cena,
        };
        inner.nuts.push(created.clone());
        Ok(created)
    }

    async fn update_nut(&self, id: i64, nut: &NutCreate) -> DataResult<Option<Nut>> {
        let mut inner = self.inner.lock().await;
        Ok(inner.nuts.iter_mut().find(|n| n.id == id).map(|current| {
            current.id_zakresu = nut.id_zakresu;
            current.nazwa = nut.nazwa.trim().to_string();
            current.srednica = nut.srednica;
            current.cena = nut.cena;
            current.clone()
        }))
    }

    async fn delete_nut(&self, id: i64) -> DataResult<bool> {
        let mut inner = self.inner.lock().await;
        let before = inner.nuts.len();
        inner.nuts.retain(|n| n.id != id);
        Ok(inner.nuts.len() != before)
    }

    async fn list_screw_lengths(&self) -> DataResult<Vec<ScrewLength>> {
        let mut screws = self.inner.lock().await.screws.clone();
        screws.sort_by(|a, b| {
            a.srednica
                .total_cmp(&b.srednica)
                .then(a.dlugosc.total_cmp(&b.dlugosc))
        });
        Ok(screws)
    }

    async fn screw_length_exists(&self, srednica: f64, dlugosc: f64) -> DataResult<bool> {
        let inner = self.inner.lock().await;
        Ok(inner
            .screws
            .iter()
            .any(|s| s.srednica.total_cmp(&srednica).is_eq() && s.dlugosc.total_cmp(&dlugosc).is_eq()))
    }

    async fn insert_screw_length(&self, screw: &ScrewLengthCreate) -> DataResult<ScrewLength> {
        let mut inner = self.inner.lock().await;
        let created = ScrewLength {
            id: inner.next(),
            srednica: screw.srednica,
            dlugosc: screw.dlugosc,
        };
        inner.screws.push(created.clone());
        Ok(created)
    }

    async fn delete_screw_length(&self, id: i64) -> DataResult<bool> {
        let mut inner = self.inner.lock().await;
        let before = inner.screws.len();
        inner.screws.retain(|s| s.id != id);
        Ok(inner.screws.len() != before)
    }
}

pub(crate) fn build_state(accounts: StubAccounts, catalog: StubCatalog) -> Arc<ApiState> {
    Arc::new(ApiState::new(
        Arc::new(accounts),
        Arc::new(catalog),
        Metrics::new().expect("metrics"),
        Duration::from_secs(30 * 60),
    ))
}

pub(crate) fn state_with(accounts: StubAccounts) -> Arc<ApiState> {
    build_state(accounts, StubCatalog::default())
}

pub(crate) fn catalog_state(catalog: StubCatalog) -> Arc<ApiState> {
    build_state(StubAccounts::default(), catalog)
}
