//! Core traits for NoteNova abstractions.
//!
//! These traits define the interfaces that concrete implementations must
//! satisfy, enabling pluggable backends and testability.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::Result;
use crate::models::*;

// =============================================================================
// USER REPOSITORY
// =============================================================================

/// Repository for account storage and lookup.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user with an already-computed password hash.
    ///
    /// Fails with `Conflict` when the username or email is taken.
    async fn create(&self, username: &str, email: &str, password_hash: &str) -> Result<User>;

    /// Look up a user by email.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>>;

    /// Look up a user by username.
    async fn find_by_username(&self, username: &str) -> Result<Option<User>>;

    /// Look up a user by id.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>>;
}

// =============================================================================
// NOTE REPOSITORY
// =============================================================================

/// Repository for note CRUD. Every operation is scoped to an owning user;
/// a note that exists but belongs to someone else behaves as `NotFound`.
#[async_trait]
pub trait NoteRepository: Send + Sync {
    /// Insert a note with its tags and flashcards in one transaction.
    /// Any failure rolls the whole note back.
    async fn create(&self, req: CreateNoteRequest, owner: Uuid) -> Result<Note>;

    /// Fetch a note (with tags) by id.
    async fn fetch(&self, id: Uuid, owner: Uuid) -> Result<Note>;

    /// List all of the owner's notes, most recently updated first.
    async fn list(&self, owner: Uuid) -> Result<Vec<Note>>;

    /// Update a note. `Some` tags/flashcards replace the existing
    /// associations wholesale; `None` leaves them untouched.
    async fn update(&self, id: Uuid, req: UpdateNoteRequest, owner: Uuid) -> Result<Note>;

    /// Replace only the summary, moving `updated_at` forward.
    async fn set_summary(&self, id: Uuid, summary: &str, owner: Uuid) -> Result<Note>;

    /// Delete a note and its tag links and flashcards.
    async fn delete(&self, id: Uuid, owner: Uuid) -> Result<()>;

    /// Search the owner's notes. `term` is a case-insensitive substring
    /// match against title, content, summary, or any tag name. A non-empty
    /// `tags` list requires the note to carry every listed tag (AND
    /// semantics). Ordered by `updated_at` descending.
    async fn search(&self, term: Option<&str>, tags: &[String], owner: Uuid) -> Result<Vec<Note>>;
}

// =============================================================================
// TAG REPOSITORY
// =============================================================================

/// Repository for tag queries. Tag creation happens inside note
/// transactions (get-or-create by name).
#[async_trait]
pub trait TagRepository: Send + Sync {
    /// Tag names with usage counts over the owner's notes, descending.
    async fn list_for_user(&self, owner: Uuid) -> Result<Vec<TagCount>>;

    /// All tag names attached to a note.
    async fn get_for_note(&self, note_id: Uuid) -> Result<Vec<String>>;
}

// =============================================================================
// FLASHCARD REPOSITORY
// =============================================================================

/// Repository for flashcard storage.
#[async_trait]
pub trait FlashcardRepository: Send + Sync {
    /// All flashcards stored for a note.
    async fn get_for_note(&self, note_id: Uuid) -> Result<Vec<Flashcard>>;

    /// Replace a note's flashcards wholesale, moving the note's
    /// `updated_at` forward in the same transaction.
    async fn replace_for_note(&self, note_id: Uuid, cards: &[CardContent]) -> Result<Vec<Flashcard>>;
}

// =============================================================================
// INFERENCE
// =============================================================================

/// Parameters for a single generation call.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub prompt: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

/// Text-generation backend (hosted LLM or mock).
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    /// Generate text for a prompt.
    async fn generate(&self, req: GenerationRequest) -> Result<String>;

    /// Check whether the backend is reachable and serving the configured
    /// model.
    async fn health_check(&self) -> Result<bool>;

    /// The model identifier in use.
    fn model_name(&self) -> &str;
}
