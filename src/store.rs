//! User persistence behind a substitutable interface.

use axum::async_trait;
use serde::Serialize;
use sqlx::{FromRow, PgPool};
use thiserror::Error;
use time::OffsetDateTime;

/// A stored user account.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct User {
    /// System-assigned identifier, immutable after creation.
    pub id: i64,
    /// Free text; may be empty and is not unique.
    pub username: String,
    /// Unique across all users, enforced by the database.
    pub email: String,
    /// Argon2 hash, never exposed in JSON.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Set by the database when the row is inserted.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    /// Stays equal to `created_at` until an update path exists.
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
    /// Soft-delete marker; `NULL` means the row is live. Nothing sets it yet,
    /// but lookups already honor it.
    #[serde(with = "time::serde::rfc3339::option")]
    pub deleted_at: Option<OffsetDateTime>,
}

/// Fields required to insert a new user.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

/// Errors surfaced by a [`UserStore`].
#[derive(Debug, Error)]
pub enum StoreError {
    /// Another user already owns this email address.
    #[error("email already registered")]
    DuplicateEmail,
    /// Any other database failure.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Persistence operations for user accounts. `AppState` holds this as a
/// trait object so tests can substitute the backing store.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a new user and return the stored row.
    async fn create_user(&self, new_user: NewUser) -> Result<User, StoreError>;

    /// Look up a user by exact email. Soft-deleted rows are not returned.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;
}

/// [`UserStore`] backed by a PostgreSQL connection pool.
#[derive(Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn create_user(&self, new_user: NewUser) -> Result<User, StoreError> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, email, password_hash)
            VALUES ($1, $2, $3)
            RETURNING id, username, email, password_hash, created_at, updated_at, deleted_at
            "#,
        )
        .bind(&new_user.username)
        .bind(&new_user.email)
        .bind(&new_user.password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db)
                if matches!(db.kind(), sqlx::error::ErrorKind::UniqueViolation) =>
            {
                StoreError::DuplicateEmail
            }
            _ => StoreError::Database(e),
        })
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, password_hash, created_at, updated_at, deleted_at
            FROM users
            WHERE email = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        let now = OffsetDateTime::now_utc();
        User {
            id: 7,
            username: "ada".into(),
            email: "ada@example.com".into(),
            password_hash: "$argon2id$v=19$secret".into(),
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    #[test]
    fn password_hash_is_never_serialized() {
        let json = serde_json::to_value(sample_user()).unwrap();
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["id"], 7);
        assert_eq!(json["email"], "ada@example.com");
    }

    #[test]
    fn timestamps_serialize_as_rfc3339() {
        let json = serde_json::to_value(sample_user()).unwrap();
        let created = json["created_at"].as_str().unwrap();
        assert!(created.contains('T'), "not RFC 3339: {created}");
        assert!(json["deleted_at"].is_null());
    }
}
