//! Note repository implementation.
//!
//! All operations are scoped to the owning user: a note that exists but
//! belongs to another user is indistinguishable from a missing one
//! (`NotFound`). Multi-table writes (note + tag links + flashcards) run in
//! a single transaction and roll back together.

use std::collections::HashSet;

use async_trait::async_trait;
use chrono::Utc;
use sqlx::any::AnyRow;
use sqlx::{Any, AnyPool, Row, Transaction};
use uuid::Uuid;

use nova_core::{
    CardContent, CreateNoteRequest, Error, Note, NoteRepository, Result, UpdateNoteRequest,
};

use crate::{escape_like, format_timestamp, parse_timestamp, parse_uuid};

/// SQL implementation of NoteRepository (SQLite or PostgreSQL via the Any
/// driver).
#[derive(Clone)]
pub struct SqlNoteRepository {
    pool: AnyPool,
}

const NOTE_COLUMNS: &str = "id, title, content, summary, user_id, created_at, updated_at";

fn map_note_row(row: AnyRow) -> Result<Note> {
    Ok(Note {
        id: parse_uuid(&row.try_get::<String, _>("id")?)?,
        title: row.try_get("title")?,
        content: row.try_get("content")?,
        summary: row.try_get("summary")?,
        user_id: parse_uuid(&row.try_get::<String, _>("user_id")?)?,
        created_at: parse_timestamp(&row.try_get::<String, _>("created_at")?)?,
        updated_at: parse_timestamp(&row.try_get::<String, _>("updated_at")?)?,
        tags: Vec::new(),
    })
}

fn not_found(id: Uuid) -> Error {
    Error::NotFound(format!("Note {} not found", id))
}

/// Look up a tag id by name, inserting the tag first if it is new.
async fn get_or_create_tag_tx(tx: &mut Transaction<'_, Any>, name: &str) -> Result<String> {
    if let Some(row) = sqlx::query("SELECT id FROM tags WHERE name = $1")
        .bind(name)
        .fetch_optional(&mut **tx)
        .await
        .map_err(Error::Database)?
    {
        return row.try_get("id").map_err(Error::Database);
    }

    sqlx::query("INSERT INTO tags (id, name) VALUES ($1, $2) ON CONFLICT DO NOTHING")
        .bind(Uuid::new_v4().to_string())
        .bind(name)
        .execute(&mut **tx)
        .await
        .map_err(Error::Database)?;

    // Re-select rather than trusting our insert: a concurrent writer may
    // have won the ON CONFLICT race.
    let row = sqlx::query("SELECT id FROM tags WHERE name = $1")
        .bind(name)
        .fetch_one(&mut **tx)
        .await
        .map_err(Error::Database)?;
    row.try_get("id").map_err(Error::Database)
}

/// Replace a note's tag links with the given names (get-or-create by name,
/// deduplicated, empty names skipped).
async fn set_tags_tx(
    tx: &mut Transaction<'_, Any>,
    note_id: Uuid,
    tag_names: &[String],
) -> Result<()> {
    sqlx::query("DELETE FROM note_tags WHERE note_id = $1")
        .bind(note_id.to_string())
        .execute(&mut **tx)
        .await
        .map_err(Error::Database)?;

    let mut seen = HashSet::new();
    for name in tag_names {
        let name = name.trim();
        if name.is_empty() || !seen.insert(name.to_string()) {
            continue;
        }
        let tag_id = get_or_create_tag_tx(tx, name).await?;
        sqlx::query(
            "INSERT INTO note_tags (note_id, tag_id) VALUES ($1, $2) ON CONFLICT DO NOTHING",
        )
        .bind(note_id.to_string())
        .bind(tag_id)
        .execute(&mut **tx)
        .await
        .map_err(Error::Database)?;
    }
    Ok(())
}

/// Replace a note's flashcards with the given cards.
async fn set_cards_tx(
    tx: &mut Transaction<'_, Any>,
    note_id: Uuid,
    cards: &[CardContent],
) -> Result<()> {
    sqlx::query("DELETE FROM flashcards WHERE note_id = $1")
        .bind(note_id.to_string())
        .execute(&mut **tx)
        .await
        .map_err(Error::Database)?;

    for (position, card) in cards.iter().enumerate() {
        sqlx::query(
            "INSERT INTO flashcards (id, note_id, question, answer, position)
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(Uuid::new_v4().to_string())
        .bind(note_id.to_string())
        .bind(&card.question)
        .bind(&card.answer)
        .bind(position as i64)
        .execute(&mut **tx)
        .await
        .map_err(Error::Database)?;
    }
    Ok(())
}

impl SqlNoteRepository {
    /// Create a new SqlNoteRepository with the given connection pool.
    pub fn new(pool: AnyPool) -> Self {
        Self { pool }
    }

    async fn tags_for(&self, note_id: Uuid) -> Result<Vec<String>> {
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

    async fn with_tags(&self, mut note: Note) -> Result<Note> {
        note.tags = self.tags_for(note.id).await?;
        Ok(note)
    }
}

#[async_trait]
impl NoteRepository for SqlNoteRepository {
    async fn create(&self, req: CreateNoteRequest, owner: Uuid) -> Result<Note> {
        if req.title.trim().is_empty() || req.content.trim().is_empty() {
            return Err(Error::Validation(
                "Title and content are required".to_string(),
            ));
        }

        let id = Uuid::new_v4();
        let now = format_timestamp(Utc::now());

        let mut tx = self.pool.begin().await.map_err(Error::Database)?;

        sqlx::query(
            "INSERT INTO notes (id, title, content, summary, user_id, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(id.to_string())
        .bind(&req.title)
        .bind(&req.content)
        .bind(req.summary.clone())
        .bind(owner.to_string())
        .bind(&now)
        .bind(&now)
        .execute(&mut *tx)
        .await
        .map_err(Error::Database)?;

        if let Some(tags) = &req.tags {
            set_tags_tx(&mut tx, id, tags).await?;
        }

        if let Some(inputs) = req.flashcards {
            let cards: Vec<CardContent> = inputs.into_iter().map(|c| c.into_card()).collect();
            set_cards_tx(&mut tx, id, &cards).await?;
        }

        tx.commit().await.map_err(Error::Database)?;

        self.fetch(id, owner).await
    }

    async fn fetch(&self, id: Uuid, owner: Uuid) -> Result<Note> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM notes WHERE id = $1 AND user_id = $2",
            NOTE_COLUMNS
        ))
        .bind(id.to_string())
        .bind(owner.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(Error::Database)?;

        match row {
            Some(row) => self.with_tags(map_note_row(row)?).await,
            None => Err(not_found(id)),
        }
    }

    async fn list(&self, owner: Uuid) -> Result<Vec<Note>> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM notes WHERE user_id = $1 ORDER BY updated_at DESC",
            NOTE_COLUMNS
        ))
        .bind(owner.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(Error::Database)?;

        let mut notes = Vec::with_capacity(rows.len());
        for row in rows {
            notes.push(self.with_tags(map_note_row(row)?).await?);
        }
        Ok(notes)
    }

    async fn update(&self, id: Uuid, req: UpdateNoteRequest, owner: Uuid) -> Result<Note> {
        if req.title.trim().is_empty() || req.content.trim().is_empty() {
            return Err(Error::Validation(
                "Title and content are required".to_string(),
            ));
        }

        let now = format_timestamp(Utc::now());

        let mut tx = self.pool.begin().await.map_err(Error::Database)?;

        let result = sqlx::query(
            "UPDATE notes SET title = $1, content = $2, summary = $3, updated_at = $4
             WHERE id = $5 AND user_id = $6",
        )
        .bind(&req.title)
        .bind(&req.content)
        .bind(req.summary.clone())
        .bind(&now)
        .bind(id.to_string())
        .bind(owner.to_string())
        .execute(&mut *tx)
        .await
        .map_err(Error::Database)?;

        if result.rows_affected() == 0 {
            return Err(not_found(id));
        }

        if let Some(tags) = &req.tags {
            set_tags_tx(&mut tx, id, tags).await?;
        }

        if let Some(inputs) = req.flashcards {
            let cards: Vec<CardContent> = inputs.into_iter().map(|c| c.into_card()).collect();
            set_cards_tx(&mut tx, id, &cards).await?;
        }

        tx.commit().await.map_err(Error::Database)?;

        self.fetch(id, owner).await
    }

    async fn set_summary(&self, id: Uuid, summary: &str, owner: Uuid) -> Result<Note> {
        let now = format_timestamp(Utc::now());

        let result = sqlx::query(
            "UPDATE notes SET summary = $1, updated_at = $2 WHERE id = $3 AND user_id = $4",
        )
        .bind(summary)
        .bind(&now)
        .bind(id.to_string())
        .bind(owner.to_string())
        .execute(&self.pool)
        .await
        .map_err(Error::Database)?;

        if result.rows_affected() == 0 {
            return Err(not_found(id));
        }

        self.fetch(id, owner).await
    }

    async fn delete(&self, id: Uuid, owner: Uuid) -> Result<()> {
        let mut tx = self.pool.begin().await.map_err(Error::Database)?;

        let row = sqlx::query("SELECT id FROM notes WHERE id = $1 AND user_id = $2")
            .bind(id.to_string())
            .bind(owner.to_string())
            .fetch_optional(&mut *tx)
            .await
            .map_err(Error::Database)?;

        if row.is_none() {
            return Err(not_found(id));
        }

        // Explicit child deletes keep cascade behavior engine-independent
        // (SQLite enforces FKs only when the per-connection pragma is on).
        sqlx::query("DELETE FROM note_tags WHERE note_id = $1")
            .bind(id.to_string())
            .execute(&mut *tx)
            .await
            .map_err(Error::Database)?;
        sqlx::query("DELETE FROM flashcards WHERE note_id = $1")
            .bind(id.to_string())
            .execute(&mut *tx)
            .await
            .map_err(Error::Database)?;
        sqlx::query("DELETE FROM notes WHERE id = $1")
            .bind(id.to_string())
            .execute(&mut *tx)
            .await
            .map_err(Error::Database)?;

        tx.commit().await.map_err(Error::Database)?;
        Ok(())
    }

    async fn search(&self, term: Option<&str>, tags: &[String], owner: Uuid) -> Result<Vec<Note>> {
        let mut sql = format!(
            "SELECT {} FROM notes n WHERE n.user_id = $1 ",
            NOTE_COLUMNS
        );
        let mut param_idx = 2;

        let term_pattern = term.map(str::trim).filter(|t| !t.is_empty()).map(|t| {
            format!("%{}%", escape_like(&t.to_lowercase()))
        });

        if term_pattern.is_some() {
            sql.push_str(&format!(
                "AND (LOWER(n.title) LIKE ${0} ESCAPE '\\' \
                 OR LOWER(n.content) LIKE ${1} ESCAPE '\\' \
                 OR LOWER(n.summary) LIKE ${2} ESCAPE '\\' \
                 OR EXISTS (SELECT 1 FROM note_tags nt INNER JOIN tags t ON nt.tag_id = t.id \
                    WHERE nt.note_id = n.id AND LOWER(t.name) LIKE ${3} ESCAPE '\\')) ",
                param_idx,
                param_idx + 1,
                param_idx + 2,
                param_idx + 3,
            ));
            param_idx += 4;
        }

        // One EXISTS per requested tag: the note must carry all of them.
        for _ in tags {
            sql.push_str(&format!(
                "AND EXISTS (SELECT 1 FROM note_tags nt INNER JOIN tags t ON nt.tag_id = t.id \
                 WHERE nt.note_id = n.id AND t.name = ${}) ",
                param_idx
            ));
            param_idx += 1;
        }

        sql.push_str("ORDER BY n.updated_at DESC");

        let mut query = sqlx::query(&sql).bind(owner.to_string());
        if let Some(pattern) = &term_pattern {
            query = query
                .bind(pattern)
                .bind(pattern)
                .bind(pattern)
                .bind(pattern);
        }
        for tag in tags {
            query = query.bind(tag);
        }

        let rows = query.fetch_all(&self.pool).await.map_err(Error::Database)?;

        let mut notes = Vec::with_capacity(rows.len());
        for row in rows {
            notes.push(self.with_tags(map_note_row(row)?).await?);
        }
        Ok(notes)
    }
}
