//! Multipart file upload endpoint.

use std::io::Write;

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use tempfile::NamedTempFile;

use nova_core::{is_supported_mime, sanitize_filename};

use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/upload
///
/// Accepts one multipart `file` field. Unsupported MIME types are rejected
/// at the boundary, before the body is spooled or extraction runs. The
/// spooled temp file is removed on every path; the `NamedTempFile` guard
/// unlinks it on drop.
pub async fn upload(
    State(state): State<AppState>,
    user: AuthUser,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    let mut spooled: Option<(NamedTempFile, String, String)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Malformed multipart body: {}", e)))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let filename = sanitize_filename(field.file_name().unwrap_or("upload"));
        let mime = field.content_type().unwrap_or_default().to_string();

        if !is_supported_mime(&mime) {
            return Err(ApiError::BadRequest(
                "Unsupported file format. Please upload PDF, DOCX, or text files.".to_string(),
            ));
        }

        let data = field
            .bytes()
            .await
            .map_err(|e| ApiError::BadRequest(format!("Failed to read upload: {}", e)))?;

        let mut file = NamedTempFile::new().map_err(nova_core::Error::Io)?;
        file.write_all(&data).map_err(nova_core::Error::Io)?;

        spooled = Some((file, filename, mime));
        break;
    }

    let Some((file, filename, mime)) = spooled else {
        return Err(ApiError::BadRequest("No file uploaded".to_string()));
    };

    let outcome = state
        .pipeline
        .process_upload(file.path(), &filename, &mime, user.id)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({
            "message": format!("Successfully processed {} file", outcome.file_type),
            "note": outcome.note,
        })),
    ))
}
