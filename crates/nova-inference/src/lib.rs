//! # nova-inference
//!
//! LLM-backed generation for NoteNova:
//! - OpenRouter chat-completions backend behind the
//!   [`nova_core::GenerationBackend`] trait
//! - Summary generation with boilerplate stripping
//! - Flashcard generation with a best-effort response-parsing cascade
//! - Injectable TTL caches for flashcards and provider availability
//! - A mock backend for deterministic tests

pub mod cache;
pub mod flashcards;
pub mod openrouter;
pub mod parser;
pub mod summary;

// Mock generation backend. Always compiled so downstream crates can drive
// their integration tests without a live provider.
pub mod mock;

pub use cache::{AvailabilityCache, FlashcardCache};
pub use flashcards::{content_hash, FlashcardGenerator};
pub use mock::MockBackend;
pub use openrouter::{OpenRouterBackend, OpenRouterConfig};
pub use summary::Summarizer;

use nova_core::defaults::MIN_AI_CONTENT_CHARS;

/// Whether the content is long enough to justify a model call.
pub fn content_sufficient_for_ai(text: &str) -> bool {
    text.trim().chars().count() >= MIN_AI_CONTENT_CHARS
}

/// Truncate to at most `max_chars` characters, on a char boundary.
pub(crate) fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_gate_boundary() {
        let short: String = "x".repeat(99);
        let enough: String = "x".repeat(100);
        assert!(!content_sufficient_for_ai(&short));
        assert!(content_sufficient_for_ai(&enough));
    }

    #[test]
    fn test_content_gate_trims_whitespace() {
        let padded = format!("   {}   ", "x".repeat(99));
        assert!(!content_sufficient_for_ai(&padded));
    }

    #[test]
    fn test_truncate_chars_respects_boundaries() {
        assert_eq!(truncate_chars("héllo", 2), "hé");
        assert_eq!(truncate_chars("short", 100), "short");
    }
}
