//! nova-api - HTTP API server for NoteNova

use std::sync::Arc;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use nova_api::{router, AppState, ServerConfig};
use nova_auth::TokenSigner;
use nova_core::defaults::TOKEN_TTL_SECS;
use nova_db::Database;
use nova_inference::OpenRouterBackend;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env();

    let db = Database::connect(&config.database_url)
        .await
        .context("failed to connect to the database")?;
    db.init_schema().await.context("failed to apply schema")?;

    let backend = Arc::new(
        OpenRouterBackend::from_env().context("failed to build the generation backend")?,
    );
    // One-time startup probe; a missing model logs a warning but does not
    // block serving.
    backend.warn_if_model_missing().await;

    let signer = TokenSigner::new(config.token_secret.as_bytes().to_vec(), TOKEN_TTL_SECS);
    let state = AppState::new(db, backend, signer);

    let app = router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind)
        .await
        .with_context(|| format!("failed to bind {}", config.bind))?;

    info!(
        subsystem = "api",
        component = "server",
        op = "listen",
        bind = %config.bind,
        "NoteNova API listening"
    );

    axum::serve(listener, app)
        .await
        .context("server terminated unexpectedly")?;

    Ok(())
}
