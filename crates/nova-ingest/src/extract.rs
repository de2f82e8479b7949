//! Format-dispatched text extraction.
//!
//! The declared MIME type picks the parser. Unknown types fail with
//! `UnsupportedFormat` before any file I/O; parser failures surface as
//! `Extraction`. The parsers themselves are external collaborators; only
//! dispatch and failure modes are owned here.

use std::path::Path;

use tracing::debug;

use nova_core::file_safety::{MIME_DOCX, MIME_PDF, MIME_TEXT};
use nova_core::{Error, Result};

/// Human-readable label for a supported MIME type, used in upload
/// responses.
pub fn file_type_label(mime: &str) -> &'static str {
    match mime {
        MIME_PDF => "PDF",
        MIME_DOCX => "DOCX",
        MIME_TEXT => "Text",
        _ => "Unknown",
    }
}

/// Extract text (or simple HTML, for DOCX) from an uploaded file.
pub fn extract_text(path: &Path, mime: &str) -> Result<String> {
    match mime {
        MIME_PDF => extract_pdf(path),
        MIME_TEXT => Ok(std::fs::read_to_string(path)?),
        MIME_DOCX => extract_docx(path),
        other => Err(Error::UnsupportedFormat(format!(
            "Unsupported file format: {}. Please upload PDF, DOCX, or text files.",
            other
        ))),
    }
}

fn push_string_operand(object: &lopdf::Object, out: &mut String) {
    if let lopdf::Object::String(bytes, _) = object {
        if let Ok(text) = std::str::from_utf8(bytes) {
            out.push_str(text);
            out.push('\n');
        }
    }
}

/// Walk the content stream of every page and collect the text-showing
/// operands (Tj and TJ).
fn extract_pdf(path: &Path) -> Result<String> {
    let doc = lopdf::Document::load(path)
        .map_err(|e| Error::Extraction(format!("Failed to extract text from PDF: {}", e)))?;

    let mut out = String::new();
    for page_id in doc.get_pages().values() {
        let page = doc
            .get_page_content(*page_id)
            .map_err(|e| Error::Extraction(format!("Failed to read PDF page: {}", e)))?;
        let content = lopdf::content::Content::decode(&page)
            .map_err(|e| Error::Extraction(format!("Failed to decode PDF content: {}", e)))?;

        for operation in content.operations {
            match operation.operator.as_str() {
                "Tj" => {
                    for operand in &operation.operands {
                        push_string_operand(operand, &mut out);
                    }
                }
                "TJ" => {
                    for operand in &operation.operands {
                        if let lopdf::Object::Array(items) = operand {
                            for item in items {
                                push_string_operand(item, &mut out);
                            }
                        }
                    }
                }
                _ => {}
            }
        }
    }

    debug!(
        subsystem = "ingest",
        component = "extract",
        op = "pdf",
        extracted_len = out.len(),
        "PDF text extracted"
    );
    Ok(out)
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Traverse paragraphs and runs, emitting one `<p>` element per non-empty
/// paragraph.
fn extract_docx(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path)?;
    let docx = docx_rs::read_docx(&bytes)
        .map_err(|e| Error::Extraction(format!("Failed to extract content from DOCX: {:?}", e)))?;

    let mut html = String::new();
    for child in docx.document.children {
        if let docx_rs::DocumentChild::Paragraph(paragraph) = child {
            let mut text = String::new();
            for paragraph_child in paragraph.children {
                if let docx_rs::ParagraphChild::Run(run) = paragraph_child {
                    for run_child in run.children {
                        if let docx_rs::RunChild::Text(t) = run_child {
                            text.push_str(&t.text);
                        }
                    }
                }
            }
            if !text.trim().is_empty() {
                html.push_str("<p>");
                html.push_str(&escape_html(text.trim()));
                html.push_str("</p>\n");
            }
        }
    }

    if html.trim().is_empty() {
        return Err(Error::Extraction(
            "DOCX file has no extractable text content".to_string(),
        ));
    }

    debug!(
        subsystem = "ingest",
        component = "extract",
        op = "docx",
        extracted_len = html.len(),
        "DOCX content extracted"
    );
    Ok(html)
}
