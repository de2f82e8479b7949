//! Schema bootstrap.
//!
//! Plain `CREATE TABLE IF NOT EXISTS` statements, phrased in the dialect
//! subset both SQLite and PostgreSQL accept: TEXT UUID primary keys,
//! RFC 3339 TEXT timestamps, `$N` placeholders elsewhere.

use sqlx::AnyPool;

use nova_core::{Error, Result};

/// Ordered DDL statements. Foreign keys declare ON DELETE CASCADE; the
/// repositories also delete child rows explicitly inside their delete
/// transactions, since SQLite only enforces FKs when the per-connection
/// pragma is on.
const SCHEMA_STATEMENTS: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS users (
        id TEXT PRIMARY KEY,
        username TEXT NOT NULL UNIQUE,
        email TEXT NOT NULL UNIQUE,
        password_hash TEXT NOT NULL,
        created_at TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS notes (
        id TEXT PRIMARY KEY,
        title TEXT NOT NULL,
        content TEXT NOT NULL,
        summary TEXT,
        user_id TEXT NOT NULL REFERENCES users(id),
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS tags (
        id TEXT PRIMARY KEY,
        name TEXT NOT NULL UNIQUE
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS note_tags (
        note_id TEXT NOT NULL REFERENCES notes(id) ON DELETE CASCADE,
        tag_id TEXT NOT NULL REFERENCES tags(id) ON DELETE CASCADE,
        PRIMARY KEY (note_id, tag_id)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS flashcards (
        id TEXT PRIMARY KEY,
        note_id TEXT NOT NULL REFERENCES notes(id) ON DELETE CASCADE,
        question TEXT NOT NULL,
        answer TEXT NOT NULL,
        position INTEGER NOT NULL DEFAULT 0
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_notes_user ON notes(user_id)",
    "CREATE INDEX IF NOT EXISTS idx_notes_updated ON notes(user_id, updated_at)",
    "CREATE INDEX IF NOT EXISTS idx_note_tags_tag ON note_tags(tag_id)",
    "CREATE INDEX IF NOT EXISTS idx_flashcards_note ON flashcards(note_id)",
];

/// Create the tables and indexes if they do not exist yet.
pub async fn init_schema(pool: &AnyPool) -> Result<()> {
    for stmt in SCHEMA_STATEMENTS {
        sqlx::query(stmt)
            .execute(pool)
            .await
            .map_err(Error::Database)?;
    }

    tracing::info!(
        subsystem = "database",
        component = "schema",
        op = "init",
        "Database schema initialized"
    );
    Ok(())
}
