//! Note summary generation.

use std::sync::{Arc, OnceLock};

use regex::Regex;
use tracing::{debug, info};

use nova_core::defaults::{
    SUMMARY_MAX_TOKENS, SUMMARY_PROMPT_WINDOW, SUMMARY_TEMPERATURE, SUMMARY_TOO_SHORT,
};
use nova_core::{Error, GenerationBackend, GenerationRequest, Result};

use crate::{content_sufficient_for_ai, truncate_chars};

/// Models love to open with framing phrases despite being told not to.
/// These run against the start of the response only.
fn leadin_patterns() -> &'static [Regex] {
    static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        vec![
            Regex::new(
                r"(?i)^(here is|this is|this document provides|this summary presents|below is|following is).*?summary[^.]*\.",
            )
            .expect("static regex must compile"),
            Regex::new(r"(?i)^in summary,?\s*").expect("static regex must compile"),
            Regex::new(r"(?i)^to summarize,?\s*").expect("static regex must compile"),
        ]
    })
}

fn strip_leadins(summary: &str) -> String {
    let mut cleaned = summary.trim().to_string();
    for pattern in leadin_patterns() {
        cleaned = pattern.replace(&cleaned, "").trim().to_string();
    }

    let mut chars = cleaned.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => cleaned,
    }
}

fn summary_prompt(content: &str) -> String {
    format!(
        "Write a concise 3-4 sentence summary of the main content and key findings in this \
         document. Focus exclusively on the substantive information, core arguments, or primary \
         conclusions.\n\nIMPORTANT: Do NOT begin with phrases like \"Here is a summary\" or \
         \"This document\". Start directly with the key points.\n\nDocument:\n{}",
        truncate_chars(content, SUMMARY_PROMPT_WINDOW)
    )
}

/// Generates note summaries through a [`GenerationBackend`].
#[derive(Clone)]
pub struct Summarizer {
    backend: Arc<dyn GenerationBackend>,
}

impl Summarizer {
    /// Create a summarizer over a generation backend.
    pub fn new(backend: Arc<dyn GenerationBackend>) -> Self {
        Self { backend }
    }

    /// The model identifier behind this summarizer.
    pub fn model_name(&self) -> &str {
        self.backend.model_name()
    }

    /// Generate a summary for note content.
    ///
    /// Content under the minimum length returns the fixed placeholder
    /// without a model call. Model failures are fatal to the request: no
    /// fallback summary, no retry.
    pub async fn generate(&self, content: &str) -> Result<String> {
        if !content_sufficient_for_ai(content) {
            debug!(
                subsystem = "inference",
                component = "summary",
                content_len = content.len(),
                "Content below minimum, returning placeholder"
            );
            return Ok(SUMMARY_TOO_SHORT.to_string());
        }

        let raw = self
            .backend
            .generate(GenerationRequest {
                prompt: summary_prompt(content),
                max_tokens: SUMMARY_MAX_TOKENS,
                temperature: SUMMARY_TEMPERATURE,
            })
            .await
            .map_err(|e| {
                Error::AiService(format!(
                    "Failed to generate summary with {}: {}",
                    self.backend.model_name(),
                    e
                ))
            })?;

        let summary = strip_leadins(&raw);

        info!(
            subsystem = "inference",
            component = "summary",
            op = "generate",
            model = self.backend.model_name(),
            response_len = summary.len(),
            "Summary generated"
        );

        Ok(summary)
    }
}
