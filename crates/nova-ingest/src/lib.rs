//! # nova-ingest
//!
//! Document ingestion for NoteNova: format-dispatched text extraction
//! (PDF, DOCX, plain text) and the upload pipeline that turns a file into
//! a stored note (extract → infer tags → summarize → persist).

pub mod extract;
pub mod pipeline;

pub use extract::{extract_text, file_type_label};
pub use pipeline::{IngestPipeline, UploadOutcome};
