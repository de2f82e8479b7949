//! Note CRUD endpoints. All of them scope to the authenticated user.
//!
//! When the client omits the summary or tags on create/update, the server
//! fills them in: a generated summary (or the too-short placeholder) and
//! keyword-inferred tags.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use uuid::Uuid;

use nova_core::{infer_tags, CreateNoteRequest, NoteRepository, UpdateNoteRequest};

use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

async fn fill_summary(
    state: &AppState,
    summary: Option<String>,
    content: &str,
) -> Result<Option<String>, ApiError> {
    match summary {
        Some(summary) => Ok(Some(summary)),
        None => Ok(Some(state.summarizer.generate(content).await?)),
    }
}

fn fill_tags(tags: Option<Vec<String>>, content: &str) -> Option<Vec<String>> {
    match tags {
        Some(tags) => Some(tags),
        None => Some(infer_tags(content)),
    }
}

/// GET /api/notes
pub async fn list_notes(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<impl IntoResponse, ApiError> {
    let notes = state.db.notes.list(user.id).await?;
    Ok(Json(notes))
}

/// GET /api/notes/:id
pub async fn get_note(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let note = state.db.notes.fetch(id, user.id).await?;
    Ok(Json(note))
}

/// POST /api/notes
pub async fn create_note(
    State(state): State<AppState>,
    user: AuthUser,
    Json(mut req): Json<CreateNoteRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if req.title.trim().is_empty() || req.content.trim().is_empty() {
        return Err(ApiError::BadRequest(
            "Title and content are required".to_string(),
        ));
    }

    req.summary = fill_summary(&state, req.summary, &req.content).await?;
    req.tags = fill_tags(req.tags, &req.content);

    let note = state.db.notes.create(req, user.id).await?;
    Ok((StatusCode::CREATED, Json(note)))
}

/// PUT /api/notes/:id
pub async fn update_note(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(mut req): Json<UpdateNoteRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if req.title.trim().is_empty() || req.content.trim().is_empty() {
        return Err(ApiError::BadRequest(
            "Title and content are required".to_string(),
        ));
    }

    req.summary = fill_summary(&state, req.summary, &req.content).await?;
    req.tags = fill_tags(req.tags, &req.content);

    let note = state.db.notes.update(id, req, user.id).await?;
    Ok(Json(note))
}

/// DELETE /api/notes/:id
pub async fn delete_note(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    state.db.notes.delete(id, user.id).await?;
    Ok(Json(serde_json::json!({
        "message": "Note deleted successfully",
    })))
}
