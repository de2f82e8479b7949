//! # nova-api
//!
//! HTTP API layer for NoteNova: the axum router, bearer-token extractors,
//! error-to-HTTP mapping, and all request handlers. The binary in
//! `main.rs` wires configuration, storage, and the generation backend into
//! [`AppState`] and serves [`router`].

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod state;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use nova_core::defaults::BODY_LIMIT_BYTES;

pub use config::ServerConfig;
pub use error::ApiError;
pub use extractors::{AuthUser, Bearer};
pub use state::AppState;

/// Build the application router over shared state.
pub fn router(state: AppState) -> Router {
    Router::new()
        // Unauthenticated surface
        .route("/api/health", get(handlers::system::health))
        .route("/api/ai/info", get(handlers::system::ai_info))
        .route("/api/auth/register", post(handlers::auth::register))
        .route("/api/auth/login", post(handlers::auth::login))
        .route("/api/auth/verify", get(handlers::auth::verify))
        // Notes
        .route(
            "/api/notes",
            get(handlers::notes::list_notes).post(handlers::notes::create_note),
        )
        .route(
            "/api/notes/:id",
            get(handlers::notes::get_note)
                .put(handlers::notes::update_note)
                .delete(handlers::notes::delete_note),
        )
        // Tags and search
        .route("/api/tags", get(handlers::tags::list_tags))
        .route("/api/search", get(handlers::tags::search))
        // Ingestion
        .route("/api/upload", post(handlers::upload::upload))
        // Flashcards and summaries
        .route(
            "/api/notes/:id/flashcards",
            get(handlers::flashcards::get_flashcards),
        )
        .route(
            "/api/notes/:id/flashcards/:card_id",
            get(handlers::flashcards::get_flashcard),
        )
        .route(
            "/api/notes/:id/flashcards/generate",
            post(handlers::flashcards::generate_flashcards),
        )
        .route(
            "/api/notes/:id/regenerate-summary",
            post(handlers::flashcards::regenerate_summary),
        )
        .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
