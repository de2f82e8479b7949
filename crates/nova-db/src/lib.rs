//! # nova-db
//!
//! Relational storage layer for NoteNova.
//!
//! This crate provides:
//! - Connection pool management over `sqlx`'s `Any` driver: the
//!   `DATABASE_URL` scheme picks SQLite (local) or PostgreSQL (production),
//!   one repository implementation serves both
//! - Schema bootstrap
//! - Repository implementations for users, notes, tags, and flashcards
//!
//! ## Example
//!
//! ```rust,ignore
//! use nova_db::Database;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let db = Database::connect("sqlite:notenova.db?mode=rwc").await?;
//!     db.init_schema().await?;
//!     Ok(())
//! }
//! ```

pub mod flashcards;
pub mod notes;
pub mod pool;
pub mod schema;
pub mod tags;
pub mod users;

// Test fixtures for integration tests.
// Always compiled so integration tests (in tests/) can use the in-memory
// database helpers.
pub mod test_fixtures;

use chrono::{DateTime, SecondsFormat, Utc};

// Re-export core types
pub use nova_core::*;

pub use flashcards::SqlFlashcardRepository;
pub use notes::SqlNoteRepository;
pub use pool::{create_pool, create_pool_with_config, PoolConfig};
pub use tags::SqlTagRepository;
pub use users::SqlUserRepository;

/// Escape LIKE wildcard characters (`%`, `_`, `\`) in user input.
pub fn escape_like(input: &str) -> String {
    input
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

/// Format a timestamp for storage. RFC 3339 UTC with fixed microsecond
/// precision, so lexicographic TEXT ordering matches chronological order on
/// both backends.
pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Parse a stored timestamp.
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| Error::Serialization(format!("invalid timestamp {:?}: {}", raw, e)))
}

/// Parse a stored UUID column.
pub fn parse_uuid(raw: &str) -> Result<uuid::Uuid> {
    uuid::Uuid::parse_str(raw)
        .map_err(|e| Error::Serialization(format!("invalid uuid {:?}: {}", raw, e)))
}

/// Combined database context with all repositories.
#[derive(Clone)]
pub struct Database {
    /// The underlying connection pool.
    pub pool: sqlx::AnyPool,
    /// User repository for account storage.
    pub users: SqlUserRepository,
    /// Note repository for CRUD and search.
    pub notes: SqlNoteRepository,
    /// Tag repository for per-user tag queries.
    pub tags: SqlTagRepository,
    /// Flashcard repository.
    pub flashcards: SqlFlashcardRepository,
}

impl Database {
    /// Create a new Database instance from a connection pool.
    pub fn new(pool: sqlx::AnyPool) -> Self {
        Self {
            users: SqlUserRepository::new(pool.clone()),
            notes: SqlNoteRepository::new(pool.clone()),
            tags: SqlTagRepository::new(pool.clone()),
            flashcards: SqlFlashcardRepository::new(pool.clone()),
            pool,
        }
    }

    /// Connect with default pool configuration.
    pub async fn connect(url: &str) -> Result<Self> {
        let pool = create_pool(url).await?;
        Ok(Self::new(pool))
    }

    /// Connect with custom pool configuration.
    pub async fn connect_with_config(url: &str, config: PoolConfig) -> Result<Self> {
        let pool = create_pool_with_config(url, config).await?;
        Ok(Self::new(pool))
    }

    /// Create the tables and indexes if they do not exist yet.
    pub async fn init_schema(&self) -> Result<()> {
        schema::init_schema(&self.pool).await
    }

    /// Get the underlying connection pool.
    pub fn pool(&self) -> &sqlx::AnyPool {
        &self.pool
    }
}
