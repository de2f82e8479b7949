//! Flashcard and summary-regeneration endpoints.
//!
//! GET never generates: a note without stored cards reports 404, and only
//! the explicit generate endpoint reaches the model. Ownership is enforced
//! by fetching the note first: a foreign note is a 404 before any
//! flashcard query runs.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use uuid::Uuid;

use nova_core::{
    CardFields, Flashcard, FlashcardRepository, Note, NoteRepository,
};
use nova_inference::content_sufficient_for_ai;

use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// One card in the deck wire format.
#[derive(Debug, Serialize)]
pub struct DeckCard {
    pub fields: CardFields,
    pub tags: Vec<String>,
}

/// The flashcard deck wire format: `{"notes": [{"fields": {...}}, ...]}`.
#[derive(Debug, Serialize)]
pub struct Deck {
    pub notes: Vec<DeckCard>,
}

fn deck_from(cards: Vec<Flashcard>, note: &Note) -> Deck {
    Deck {
        notes: cards
            .into_iter()
            .map(|card| DeckCard {
                fields: CardFields {
                    front: card.question,
                    back: card.answer,
                },
                tags: note.tags.clone(),
            })
            .collect(),
    }
}

/// GET /api/notes/:id/flashcards
pub async fn get_flashcards(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let note = state.db.notes.fetch(id, user.id).await?;
    let cards = state.db.flashcards.get_for_note(id).await?;

    if cards.is_empty() {
        return Err(ApiError::NotFound(
            "No flashcards found for this note".to_string(),
        ));
    }

    Ok(Json(deck_from(cards, &note)))
}

/// GET /api/notes/:id/flashcards/:card_id
///
/// Study mode: a single card with position metadata. An out-of-range index
/// falls back to the whole deck.
pub async fn get_flashcard(
    State(state): State<AppState>,
    user: AuthUser,
    Path((id, card_id)): Path<(Uuid, usize)>,
) -> Result<impl IntoResponse, ApiError> {
    let note = state.db.notes.fetch(id, user.id).await?;
    let cards = state.db.flashcards.get_for_note(id).await?;

    if cards.is_empty() {
        return Err(ApiError::NotFound(
            "No flashcards found for this note".to_string(),
        ));
    }

    let deck = deck_from(cards, &note);
    if card_id < deck.notes.len() {
        let total = deck.notes.len();
        let card = &deck.notes[card_id];
        return Ok(Json(serde_json::json!({
            "card": card,
            "total": total,
            "current_index": card_id,
        })));
    }

    Ok(Json(serde_json::json!(deck)))
}

/// POST /api/notes/:id/flashcards/generate
///
/// Always regenerates (cache bypass), replaces the stored cards wholesale,
/// and moves the note's `updated_at` forward.
pub async fn generate_flashcards(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let note = state.db.notes.fetch(id, user.id).await?;

    if !content_sufficient_for_ai(&note.content) {
        return Err(ApiError::BadRequest(
            "Failed to generate flashcards. Please ensure your note has enough content."
                .to_string(),
        ));
    }

    let cards = state
        .flashcards
        .generate(&note.content, &note.title, &note.tags, true)
        .await?;

    let stored = state.db.flashcards.replace_for_note(id, &cards).await?;

    Ok(Json(deck_from(stored, &note)))
}

/// POST /api/notes/:id/regenerate-summary
pub async fn regenerate_summary(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let note = state.db.notes.fetch(id, user.id).await?;

    if !content_sufficient_for_ai(&note.content) {
        return Err(ApiError::BadRequest(
            "Failed to regenerate summary. Please ensure your note has enough content."
                .to_string(),
        ));
    }

    let summary = state.summarizer.generate(&note.content).await?;
    let updated = state.db.notes.set_summary(id, &summary, user.id).await?;

    Ok(Json(serde_json::json!({
        "message": "Summary regenerated successfully",
        "note": updated,
    })))
}
