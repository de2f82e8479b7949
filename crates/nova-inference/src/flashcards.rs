//! Flashcard generation.

use std::sync::Arc;

use sha2::{Digest, Sha256};
use tracing::{debug, info};

use nova_core::defaults::{
    ANSWER_MAX_CHARS, FLASHCARD_MAX_TOKENS, FLASHCARD_PROMPT_WINDOW, FLASHCARD_TEMPERATURE,
};
use nova_core::{CardContent, Error, GenerationBackend, GenerationRequest, Result};

use crate::cache::{AvailabilityCache, FlashcardCache};
use crate::{content_sufficient_for_ai, parser, truncate_chars};

/// SHA-256 hex digest of note content, used as the cache key.
pub fn content_hash(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    hex::encode(hasher.finalize())
}

fn flashcard_prompt(content: &str, title: &str, tags: &[String]) -> String {
    let tags_info = if tags.is_empty() {
        String::new()
    } else {
        format!("The note is tagged with: {}.", tags.join(", "))
    };
    let title = if title.trim().is_empty() {
        "Untitled Note"
    } else {
        title
    };

    format!(
        "Generate as many flashcards as possible from the following text. Each flashcard must \
         have a clear question and a VERY CONCISE answer (preferably 1-2 sentences maximum). \
         Focus on key facts, definitions, processes, or important concepts.\n\n\
         IMPORTANT GUIDELINES:\n\
         - Keep answers brief and to the point - no longer than 2 sentences when possible\n\
         - Make each answer focused on a single concept or fact\n\
         - Avoid lengthy explanations or examples\n\
         - Questions should be specific and direct\n\
         - Answers should be factual and precise\n\n\
         PREFERRED FORMAT:\n\
         [\n  {{\n    \"question\": \"What is X?\",\n    \"answer\": \"X is Y. It has properties Z.\"\n  }},\n  ...\n]\n\n\
         Note title: {}\n{}\n\nContent:\n{}",
        title,
        tags_info,
        truncate_chars(content, FLASHCARD_PROMPT_WINDOW)
    )
}

/// Strip a stray "Question:"/"Answer:" label the model worked into the card
/// text itself, and cap answer length at a sentence break.
fn tidy_card(card: CardContent) -> CardContent {
    let question = match card.question.split_once("Question:") {
        Some((_, rest)) => rest.trim().to_string(),
        None => card.question,
    };
    let answer = match card.answer.split_once("Answer:") {
        Some((_, rest)) => rest.trim().to_string(),
        None => card.answer,
    };

    CardContent {
        question,
        answer: truncate_answer(&answer),
    }
}

fn truncate_answer(answer: &str) -> String {
    if answer.chars().count() <= ANSWER_MAX_CHARS {
        return answer.to_string();
    }

    // Prefer a sentence break in the back half of the budget.
    if let Some(window_start) = answer.char_indices().nth(100).map(|(idx, _)| idx) {
        if let Some(rel) = answer[window_start..].find(". ") {
            let cut = window_start + rel + 1;
            if answer[..cut].chars().count() < ANSWER_MAX_CHARS {
                return answer[..cut].to_string();
            }
        }
    }

    let cut = answer
        .char_indices()
        .nth(ANSWER_MAX_CHARS)
        .map(|(idx, _)| idx)
        .unwrap_or(answer.len());
    format!("{}...", &answer[..cut])
}

/// Generates flashcards through a [`GenerationBackend`], caching results by
/// content hash.
#[derive(Clone)]
pub struct FlashcardGenerator {
    backend: Arc<dyn GenerationBackend>,
    cache: Arc<FlashcardCache>,
    availability: Arc<AvailabilityCache>,
}

impl FlashcardGenerator {
    /// Create a generator over a backend and explicitly injected caches.
    pub fn new(
        backend: Arc<dyn GenerationBackend>,
        cache: Arc<FlashcardCache>,
        availability: Arc<AvailabilityCache>,
    ) -> Self {
        Self {
            backend,
            cache,
            availability,
        }
    }

    async fn provider_available(&self) -> bool {
        if let Some(cached) = self.availability.get() {
            return cached;
        }
        let available = self.backend.health_check().await.unwrap_or(false);
        self.availability.set(available);
        available
    }

    /// Generate flashcards for a note.
    ///
    /// Content under the minimum length is a `Validation` error. Cached
    /// results are reused unless `force` is set. The response parser always
    /// recovers at least one card (possibly the generic fallback); the
    /// whole stage is best-effort, not a guarantee of faithful recovery.
    pub async fn generate(
        &self,
        content: &str,
        title: &str,
        tags: &[String],
        force: bool,
    ) -> Result<Vec<CardContent>> {
        if !content_sufficient_for_ai(content) {
            return Err(Error::Validation(
                "Content is too short for flashcard generation".to_string(),
            ));
        }

        let key = content_hash(content);
        if !force {
            if let Some(cached) = self.cache.get(&key) {
                debug!(
                    subsystem = "inference",
                    component = "flashcards",
                    op = "cache_hit",
                    card_count = cached.len(),
                    "Using cached flashcards"
                );
                return Ok(cached);
            }
        }

        if !self.provider_available().await {
            return Err(Error::AiService(
                "Language model API unavailable. Cannot generate flashcards.".to_string(),
            ));
        }

        let raw = self
            .backend
            .generate(GenerationRequest {
                prompt: flashcard_prompt(content, title, tags),
                max_tokens: FLASHCARD_MAX_TOKENS,
                temperature: FLASHCARD_TEMPERATURE,
            })
            .await
            .map_err(|e| {
                Error::AiService(format!(
                    "Failed to generate flashcards with {}: {}",
                    self.backend.model_name(),
                    e
                ))
            })?;

        let cards: Vec<CardContent> = parser::extract_flashcards(&raw, title)
            .into_iter()
            .map(tidy_card)
            .collect();

        info!(
            subsystem = "inference",
            component = "flashcards",
            op = "generate",
            model = self.backend.model_name(),
            card_count = cards.len(),
            forced = force,
            "Flashcards generated"
        );

        self.cache.insert(key, cards.clone());
        Ok(cards)
    }
}
