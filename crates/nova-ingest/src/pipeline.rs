//! The upload pipeline: extract → infer tags → summarize → persist.
//!
//! A linear, fail-fast sequence. Any stage error propagates to the caller
//! and nothing is persisted; temp-file cleanup is the HTTP layer's concern.

use std::path::Path;
use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use nova_core::{infer_tags, title_from_filename, CreateNoteRequest, Note, NoteRepository, Result};
use nova_inference::Summarizer;

use crate::extract::{extract_text, file_type_label};

/// A processed upload: the stored note plus the human-readable file type
/// for the response message.
#[derive(Debug, Clone)]
pub struct UploadOutcome {
    pub note: Note,
    pub file_type: &'static str,
}

/// Turns uploaded files into stored notes.
#[derive(Clone)]
pub struct IngestPipeline {
    notes: Arc<dyn NoteRepository>,
    summarizer: Summarizer,
}

impl IngestPipeline {
    /// Create the pipeline over a note repository and summarizer.
    pub fn new(notes: Arc<dyn NoteRepository>, summarizer: Summarizer) -> Self {
        Self { notes, summarizer }
    }

    /// Process one uploaded file for `owner`.
    ///
    /// The note title comes from the original filename (extension
    /// stripped), tags from keyword inference over the extracted text, and
    /// the summary from the generation backend (or the too-short
    /// placeholder).
    pub async fn process_upload(
        &self,
        path: &Path,
        original_filename: &str,
        mime: &str,
        owner: Uuid,
    ) -> Result<UploadOutcome> {
        let content = extract_text(path, mime)?;
        let file_type = file_type_label(mime);

        let title = title_from_filename(original_filename);
        let tags = infer_tags(&content);
        let summary = self.summarizer.generate(&content).await?;

        let note = self
            .notes
            .create(
                CreateNoteRequest {
                    title,
                    content,
                    summary: Some(summary),
                    tags: Some(tags),
                    flashcards: None,
                },
                owner,
            )
            .await?;

        info!(
            subsystem = "ingest",
            component = "pipeline",
            op = "process_upload",
            note_id = %note.id,
            file_type,
            tag_count = note.tags.len(),
            "Upload processed"
        );

        Ok(UploadOutcome { note, file_type })
    }
}
