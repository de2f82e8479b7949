//! Tag listing and search endpoints.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use nova_core::{NoteRepository, TagRepository};

use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/tags
pub async fn list_tags(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<impl IntoResponse, ApiError> {
    let tags = state.db.tags.list_for_user(user.id).await?;
    Ok(Json(tags))
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    /// Free-text term, matched as a case-insensitive substring.
    pub q: Option<String>,
    /// Comma-separated tag names; the note must carry all of them.
    pub tags: Option<String>,
}

/// GET /api/search?q=&tags=
pub async fn search(
    State(state): State<AppState>,
    user: AuthUser,
    Query(params): Query<SearchParams>,
) -> Result<impl IntoResponse, ApiError> {
    let tags: Vec<String> = params
        .tags
        .as_deref()
        .unwrap_or("")
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(String::from)
        .collect();

    let notes = state
        .db
        .notes
        .search(params.q.as_deref(), &tags, user.id)
        .await?;
    Ok(Json(notes))
}
