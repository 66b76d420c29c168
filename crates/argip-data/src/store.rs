//! Connection handle and migration bootstrap.

use sqlx::PgPool;
use tracing::info;

use crate::error::{DataError, Result};

/// Database-backed repository for accounts, sessions, and the catalog.
#[derive(Clone)]
pub struct PgStore {
    pub(crate) pool: PgPool,
}

const PING: &str = r"SELECT 1";

impl PgStore {
    /// Initialise the store, applying pending migrations.
    ///
    /// # Errors
    ///
    /// Returns an error if migrations fail or the database is unreachable.
    pub async fn new(pool: PgPool) -> Result<Self> {
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(|source| DataError::MigrationFailed { source })?;
        info!("database migrations applied");
        Ok(Self { pool })
    }

    /// Access the underlying connection pool.
    #[must_use]
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Round-trip a trivial query to confirm the database answers.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be reached.
    pub async fn ping(&self) -> Result<()> {
        sqlx::query(PING)
            .execute(&self.pool)
            .await
            .map_err(DataError::query("store.ping"))?;
        Ok(())
    }
}
