//! Upload safety helpers: accepted MIME types and filename handling.

/// MIME type for PDF uploads.
pub const MIME_PDF: &str = "application/pdf";

/// MIME type for plain-text uploads.
pub const MIME_TEXT: &str = "text/plain";

/// MIME type for DOCX uploads.
pub const MIME_DOCX: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Whether the declared MIME type is one the ingestion pipeline handles.
pub fn is_supported_mime(mime: &str) -> bool {
    matches!(mime, MIME_PDF | MIME_TEXT | MIME_DOCX)
}

/// Derive a note title from an uploaded filename by stripping the last
/// extension. A name without an extension is returned as-is.
pub fn title_from_filename(filename: &str) -> String {
    match filename.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem.to_string(),
        _ => filename.to_string(),
    }
}

/// Strip path separators and control characters from a client-supplied
/// filename before it is used on disk.
pub fn sanitize_filename(filename: &str) -> String {
    filename
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect()
}
