//! User accounts and bearer sessions.
//!
//! # Design
//! - Only argon2 hashes are stored; hashing happens in the API layer.
//! - Sessions are keyed by a random UUID embedded in the issued token.

use argip_api_models::User;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, Row, postgres::PgRow};
use uuid::Uuid;

use crate::error::{DataError, Result};
use crate::store::PgStore;

/// Stored account including its password hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    /// Account identifier.
    pub id: i64,
    /// Unique login name.
    pub username: String,
    /// Unique e-mail address.
    pub email: String,
    /// PHC-formatted argon2 hash.
    pub hashed_password: String,
}

impl UserRecord {
    /// Public projection without credentials.
    #[must_use]
    pub fn to_user(&self) -> User {
        User {
            id: self.id,
            username: self.username.clone(),
            email: self.email.clone(),
        }
    }
}

impl<'r> FromRow<'r, PgRow> for UserRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: row.try_get("id")?,
            username: row.try_get("username")?,
            email: row.try_get("email")?,
            hashed_password: row.try_get("hashed_password")?,
        })
    }
}

/// Fields required to create an account.
#[derive(Debug, Clone)]
pub struct NewUser<'a> {
    /// Unique login name.
    pub username: &'a str,
    /// Unique e-mail address.
    pub email: &'a str,
    /// PHC-formatted argon2 hash.
    pub hashed_password: &'a str,
}

/// Stored bearer session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionRecord {
    /// Session identifier (token prefix).
    pub id: Uuid,
    /// Owning account.
    pub user_id: i64,
    /// PHC-formatted argon2 hash of the token secret.
    pub secret_hash: String,
    /// Instant after which the session is rejected.
    pub expires_at: DateTime<Utc>,
}

impl SessionRecord {
    /// Whether the session is no longer valid at `now`.
    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

const INSERT_USER: &str = r"
    INSERT INTO users (username, email, hashed_password)
    VALUES ($1, $2, $3)
    RETURNING id, username, email, hashed_password
";

const SELECT_USER_BY_USERNAME: &str = r"
    SELECT id, username, email, hashed_password FROM users WHERE username = $1
";

const SELECT_USER_BY_EMAIL: &str = r"
    SELECT id, username, email, hashed_password FROM users WHERE email = $1
";

const SELECT_USER_BY_ID: &str = r"
    SELECT id, username, email, hashed_password FROM users WHERE id = $1
";

const INSERT_SESSION: &str = r"
    INSERT INTO sessions (id, user_id, secret_hash, expires_at)
    VALUES ($1, $2, $3, $4)
";

const SELECT_SESSION: &str = r"
    SELECT id, user_id, secret_hash, expires_at FROM sessions WHERE id = $1
";

const DELETE_SESSION: &str = r"DELETE FROM sessions WHERE id = $1";

const DELETE_EXPIRED_SESSIONS: &str = r"DELETE FROM sessions WHERE expires_at <= $1";

impl PgStore {
    /// Insert a new account.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails; duplicate usernames or e-mails surface
    /// through [`DataError::unique_violation`].
    pub async fn insert_user(&self, user: NewUser<'_>) -> Result<UserRecord> {
        sqlx::query_as::<_, UserRecord>(INSERT_USER)
            .bind(user.username)
            .bind(user.email)
            .bind(user.hashed_password)
            .fetch_one(&self.pool)
            .await
            .map_err(DataError::query("users.insert"))
    }

    /// Look up an account by login name.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn find_user_by_username(&self, username: &str) -> Result<Option<UserRecord>> {
        sqlx::query_as::<_, UserRecord>(SELECT_USER_BY_USERNAME)
            .bind(username)
            .fetch_optional(&self.pool)
            .await
            .map_err(DataError::query("users.by_username"))
    }

    /// Look up an account by e-mail address.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn find_user_by_email(&self, email: &str) -> Result<Option<UserRecord>> {
        sqlx::query_as::<_, UserRecord>(SELECT_USER_BY_EMAIL)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(DataError::query("users.by_email"))
    }

    /// Look up an account by identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn find_user(&self, id: i64) -> Result<Option<UserRecord>> {
        sqlx::query_as::<_, UserRecord>(SELECT_USER_BY_ID)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(DataError::query("users.by_id"))
    }

    /// Persist a new session.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub async fn insert_session(&self, session: &SessionRecord) -> Result<()> {
        sqlx::query(INSERT_SESSION)
            .bind(session.id)
            .bind(session.user_id)
            .bind(&session.secret_hash)
            .bind(session.expires_at)
            .execute(&self.pool)
            .await
            .map_err(DataError::query("sessions.insert"))?;
        Ok(())
    }

    /// Fetch a session by identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn find_session(&self, id: Uuid) -> Result<Option<SessionRecord>> {
        let row = sqlx::query(SELECT_SESSION)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(DataError::query("sessions.get"))?;
        row.map(|row| -> sqlx::Result<SessionRecord> {
            Ok(SessionRecord {
                id: row.try_get("id")?,
                user_id: row.try_get("user_id")?,
                secret_hash: row.try_get("secret_hash")?,
                expires_at: row.try_get("expires_at")?,
            })
        })
        .transpose()
        .map_err(DataError::query("sessions.decode"))
    }

    /// Remove a session, returning whether one existed.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub async fn delete_session(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query(DELETE_SESSION)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(DataError::query("sessions.delete"))?;
        Ok(result.rows_affected() > 0)
    }

    /// Remove every session that expired at or before `now`.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub async fn purge_expired_sessions(&self, now: DateTime<Utc>) -> Result<u64> {
        let result = sqlx::query(DELETE_EXPIRED_SESSIONS)
            .bind(now)
            .execute(&self.pool)
            .await
            .map_err(DataError::query("sessions.purge"))?;
        Ok(result.rows_affected())
    }
}
