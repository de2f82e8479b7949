//! Flashcard repository implementation.
//!
//! Flashcards are owned by a note and replaced wholesale whenever they are
//! regenerated. Replacement also moves the note's `updated_at` forward, in
//! the same transaction.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::any::AnyRow;
use sqlx::{AnyPool, Row};
use uuid::Uuid;

use nova_core::{CardContent, Error, Flashcard, FlashcardRepository, Result};

use crate::{format_timestamp, parse_uuid};

/// SQL implementation of FlashcardRepository (SQLite or PostgreSQL via the
/// Any driver).
#[derive(Clone)]
pub struct SqlFlashcardRepository {
    pool: AnyPool,
}

impl SqlFlashcardRepository {
    /// Create a new SqlFlashcardRepository with the given connection pool.
    pub fn new(pool: AnyPool) -> Self {
        Self { pool }
    }
}

fn map_card_row(row: AnyRow) -> Result<Flashcard> {
    Ok(Flashcard {
        id: parse_uuid(&row.try_get::<String, _>("id")?)?,
        note_id: parse_uuid(&row.try_get::<String, _>("note_id")?)?,
        question: row.try_get("question")?,
        answer: row.try_get("answer")?,
    })
}

#[async_trait]
impl FlashcardRepository for SqlFlashcardRepository {
    async fn get_for_note(&self, note_id: Uuid) -> Result<Vec<Flashcard>> {
        let rows = sqlx::query(
            "SELECT id, note_id, question, answer FROM flashcards
             WHERE note_id = $1 ORDER BY position",
        )
        .bind(note_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(Error::Database)?;

        rows.into_iter().map(map_card_row).collect()
    }

    async fn replace_for_note(
        &self,
        note_id: Uuid,
        cards: &[CardContent],
    ) -> Result<Vec<Flashcard>> {
        let mut tx = self.pool.begin().await.map_err(Error::Database)?;

        sqlx::query("DELETE FROM flashcards WHERE note_id = $1")
            .bind(note_id.to_string())
            .execute(&mut *tx)
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
            .execute(&mut *tx)
            .await
            .map_err(Error::Database)?;
        }

        sqlx::query("UPDATE notes SET updated_at = $1 WHERE id = $2")
            .bind(format_timestamp(Utc::now()))
            .bind(note_id.to_string())
            .execute(&mut *tx)
            .await
            .map_err(Error::Database)?;

        tx.commit().await.map_err(Error::Database)?;

        self.get_for_note(note_id).await
    }
}
