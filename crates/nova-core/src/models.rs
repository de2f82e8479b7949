//! Domain models for NoteNova.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A registered account. The password hash never leaves the persistence and
/// auth layers; API responses use [`PublicUser`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// The user fields safe to return to clients.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PublicUser {
    pub id: Uuid,
    pub username: String,
    pub email: String,
}

impl From<User> for PublicUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
        }
    }
}

/// A note with its associated tag names.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Note {
    pub id: Uuid,
    pub title: String,
    /// HTML content (extracted or user-authored).
    pub content: String,
    pub summary: Option<String>,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub tags: Vec<String>,
}

/// A tag name with its usage count across one user's notes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagCount {
    pub name: String,
    pub count: i64,
}

/// A stored flashcard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Flashcard {
    pub id: Uuid,
    pub note_id: Uuid,
    pub question: String,
    pub answer: String,
}

/// A question/answer pair not yet persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardContent {
    pub question: String,
    pub answer: String,
}

/// The Front/Back field pair used by the deck wire format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardFields {
    #[serde(rename = "Front")]
    pub front: String,
    #[serde(rename = "Back")]
    pub back: String,
}

/// Flashcard input as clients send it: either a flat question/answer pair or
/// the nested fields shape used by the deck wire format. Both normalize to
/// [`CardContent`] before storage.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FlashcardInput {
    Flat { question: String, answer: String },
    Fielded { fields: CardFields },
}

impl FlashcardInput {
    /// Normalize either input shape to the stored question/answer form.
    pub fn into_card(self) -> CardContent {
        match self {
            FlashcardInput::Flat { question, answer } => CardContent { question, answer },
            FlashcardInput::Fielded { fields } => CardContent {
                question: fields.front,
                answer: fields.back,
            },
        }
    }
}

/// Request for creating a note. Summary and tags are optional; the API layer
/// fills them in (generated summary, inferred tags) when absent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateNoteRequest {
    pub title: String,
    pub content: String,
    pub summary: Option<String>,
    pub tags: Option<Vec<String>>,
    pub flashcards: Option<Vec<FlashcardInput>>,
}

/// Request for updating a note. `tags`/`flashcards` of `None` leave the
/// existing associations untouched; `Some` replaces them wholesale.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateNoteRequest {
    pub title: String,
    pub content: String,
    pub summary: Option<String>,
    pub tags: Option<Vec<String>>,
    pub flashcards: Option<Vec<FlashcardInput>>,
}
