//! Shared fixtures for integration tests.
//!
//! An in-memory SQLite database per fixture. The pool is pinned to a single
//! connection that never idles out: every `sqlite::memory:` connection is
//! its own database, so a second connection would see an empty schema.

use std::time::Duration;

use nova_core::{User, UserRepository};

use crate::pool::PoolConfig;
use crate::Database;

/// URL for the throwaway in-memory test database.
pub const TEST_DATABASE_URL: &str = "sqlite::memory:";

/// Connect to a fresh in-memory database with the schema applied.
pub async fn memory_db() -> Database {
    let config = PoolConfig::new()
        .max_connections(1)
        .min_connections(1)
        .connect_timeout(Duration::from_secs(5))
        .idle_timeout(None)
        .max_lifetime(None);

    let db = Database::connect_with_config(TEST_DATABASE_URL, config)
        .await
        .expect("in-memory database should connect");
    db.init_schema()
        .await
        .expect("schema init should succeed on a fresh database");
    db
}

/// Create a user named `name` with a deterministic email and a placeholder
/// hash. Tests that exercise real password flows go through nova-auth.
pub async fn seed_user(db: &Database, name: &str) -> User {
    db.users
        .create(
            name,
            &format!("{}@example.com", name),
            "$argon2id$test-placeholder-hash",
        )
        .await
        .expect("seed user should insert")
}
