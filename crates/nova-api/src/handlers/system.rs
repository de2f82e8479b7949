//! Health and model-info endpoints.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;

use crate::state::AppState;

/// GET /api/health
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// GET /api/ai/info
pub async fn ai_info(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "model": state.summarizer.model_name(),
        "provider": "OpenRouter",
        "features": [
            "Summary generation",
            "Flashcard creation",
            "Auto-tagging",
        ],
        "needs_local_setup": false,
    }))
}
