//! User repository implementation.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::any::AnyRow;
use sqlx::{AnyPool, Row};
use uuid::Uuid;

use nova_core::{Error, Result, User, UserRepository};

use crate::{format_timestamp, parse_timestamp, parse_uuid};

/// SQL implementation of UserRepository (SQLite or PostgreSQL via the Any
/// driver).
#[derive(Clone)]
pub struct SqlUserRepository {
    pool: AnyPool,
}

impl SqlUserRepository {
    /// Create a new SqlUserRepository with the given connection pool.
    pub fn new(pool: AnyPool) -> Self {
        Self { pool }
    }
}

fn map_user_row(row: AnyRow) -> Result<User> {
    Ok(User {
        id: parse_uuid(&row.try_get::<String, _>("id")?)?,
        username: row.try_get("username")?,
        email: row.try_get("email")?,
        password_hash: row.try_get("password_hash")?,
        created_at: parse_timestamp(&row.try_get::<String, _>("created_at")?)?,
    })
}

/// Turn a uniqueness violation into a Conflict with the same messages the
/// pre-insert existence checks produce. SQLite reports
/// "UNIQUE constraint failed: users.email"; PostgreSQL reports
/// "duplicate key value violates unique constraint".
fn map_unique_violation(err: sqlx::Error) -> Error {
    if let sqlx::Error::Database(db_err) = &err {
        let msg = db_err.message().to_lowercase();
        if msg.contains("unique") || msg.contains("duplicate key") {
            if msg.contains("email") {
                return Error::Conflict("Email already in use".to_string());
            }
            if msg.contains("username") {
                return Error::Conflict("Username already in use".to_string());
            }
            return Error::Conflict(db_err.message().to_string());
        }
    }
    Error::Database(err)
}

#[async_trait]
impl UserRepository for SqlUserRepository {
    async fn create(&self, username: &str, email: &str, password_hash: &str) -> Result<User> {
        let id = Uuid::new_v4();
        let now = Utc::now();

        sqlx::query(
            "INSERT INTO users (id, username, email, password_hash, created_at)
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(id.to_string())
        .bind(username)
        .bind(email)
        .bind(password_hash)
        .bind(format_timestamp(now))
        .execute(&self.pool)
        .await
        .map_err(map_unique_violation)?;

        Ok(User {
            id,
            username: username.to_string(),
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            created_at: now,
        })
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let row = sqlx::query(
            "SELECT id, username, email, password_hash, created_at
             FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(Error::Database)?;

        row.map(map_user_row).transpose()
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        let row = sqlx::query(
            "SELECT id, username, email, password_hash, created_at
             FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(Error::Database)?;

        row.map(map_user_row).transpose()
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>> {
        let row = sqlx::query(
            "SELECT id, username, email, password_hash, created_at
             FROM users WHERE id = $1",
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(Error::Database)?;

        row.map(map_user_row).transpose()
    }
}
