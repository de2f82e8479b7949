//! Centralized default constants for NoteNova.
//!
//! Single source of truth for shared default values. Crates reference these
//! constants instead of defining their own magic numbers.

// =============================================================================
// GENERATION
// =============================================================================

/// Default OpenRouter API base URL.
pub const OPENROUTER_URL: &str = "https://openrouter.ai/api/v1";

/// Default generation model.
pub const GEN_MODEL: &str = "meta-llama/llama-3.3-70b-instruct:free";

/// Timeout for generation requests (seconds).
pub const GEN_TIMEOUT_SECS: u64 = 60;

/// Minimum trimmed content length (chars) before the model is called at all.
pub const MIN_AI_CONTENT_CHARS: usize = 100;

/// How much note content is passed to the summary prompt.
pub const SUMMARY_PROMPT_WINDOW: usize = 4000;

/// How much note content is passed to the flashcard prompt.
pub const FLASHCARD_PROMPT_WINDOW: usize = 5000;

/// Token budget for summary generation.
pub const SUMMARY_MAX_TOKENS: u32 = 1000;

/// Sampling temperature for summary generation.
pub const SUMMARY_TEMPERATURE: f32 = 0.5;

/// Token budget for flashcard generation.
pub const FLASHCARD_MAX_TOKENS: u32 = 2000;

/// Sampling temperature for flashcard generation.
pub const FLASHCARD_TEMPERATURE: f32 = 0.3;

/// Placeholder summary returned without a model call for short content.
pub const SUMMARY_TOO_SHORT: &str = "No summary generated (content too short).";

/// Flashcard answers longer than this are truncated at a sentence break.
pub const ANSWER_MAX_CHARS: usize = 150;

// =============================================================================
// CACHES
// =============================================================================

/// How long a provider availability probe stays valid.
pub const AVAILABILITY_TTL_SECS: u64 = 300;

/// How long cached flashcards stay valid.
pub const FLASHCARD_CACHE_TTL_SECS: u64 = 3600;

/// Maximum number of content hashes held in the flashcard cache.
pub const FLASHCARD_CACHE_CAPACITY: usize = 256;

// =============================================================================
// AUTH
// =============================================================================

/// Session token lifetime: 7 days.
pub const TOKEN_TTL_SECS: i64 = 7 * 24 * 60 * 60;

/// Minimum password length accepted at registration.
pub const MIN_PASSWORD_CHARS: usize = 6;

// =============================================================================
// SERVER
// =============================================================================

/// Default HTTP bind address.
pub const SERVER_BIND: &str = "127.0.0.1:5001";

/// Default database URL (local SQLite file, created on first run).
pub const DATABASE_URL: &str = "sqlite:notenova.db?mode=rwc";

/// Request body limit (uploads included): 50 MB.
pub const BODY_LIMIT_BYTES: usize = 50 * 1024 * 1024;
