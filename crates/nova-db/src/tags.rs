//! Tag repository implementation.
//!
//! Tags are global, deduplicated by name, and created lazily inside note
//! transactions; this repository only answers queries.

use async_trait::async_trait;
use sqlx::{AnyPool, Row};
use uuid::Uuid;

use nova_core::{Error, Result, TagCount, TagRepository};

/// SQL implementation of TagRepository (SQLite or PostgreSQL via the Any
/// driver).
#[derive(Clone)]
pub struct SqlTagRepository {
    pool: AnyPool,
}

impl SqlTagRepository {
    /// Create a new SqlTagRepository with the given connection pool.
    pub fn new(pool: AnyPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TagRepository for SqlTagRepository {
    async fn list_for_user(&self, owner: Uuid) -> Result<Vec<TagCount>> {
        let rows = sqlx::query(
            "SELECT t.name, COUNT(nt.note_id) AS usage_count
             FROM tags t
             INNER JOIN note_tags nt ON t.id = nt.tag_id
             INNER JOIN notes n ON nt.note_id = n.id
             WHERE n.user_id = $1
             GROUP BY t.id, t.name
             ORDER BY usage_count DESC, t.name ASC",
        )
        .bind(owner.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(Error::Database)?;

        rows.into_iter()
            .map(|row| {
                Ok(TagCount {
                    name: row.try_get("name")?,
                    count: row.try_get("usage_count")?,
                })
            })
            .collect()
    }

    async fn get_for_note(&self, note_id: Uuid) -> Result<Vec<String>> {
        let rows = sqlx::query(
            "SELECT t.name FROM tags t
             INNER JOIN note_tags nt ON t.id = nt.tag_id
             WHERE nt.note_id = $1
             ORDER BY t.name",
        )
        .bind(note_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(Error::Database)?;

        rows.into_iter()
            .map(|row| row.try_get("name").map_err(Error::Database))
            .collect()
    }
}
