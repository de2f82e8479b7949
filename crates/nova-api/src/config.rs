//! Environment-driven server configuration.

use tracing::warn;

use nova_core::defaults::{DATABASE_URL, SERVER_BIND};

/// Development fallback when no token secret is configured. Tokens signed
/// with it are worthless outside a local setup, hence the startup warning.
const DEV_TOKEN_SECRET: &str = "notenova-dev-secret-change-me";

/// Server settings read from the environment.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind, e.g. "127.0.0.1:5001".
    pub bind: String,
    /// Database URL; the scheme (`sqlite:` / `postgres:`) picks the
    /// backend.
    pub database_url: String,
    /// HMAC secret for session tokens.
    pub token_secret: String,
}

impl ServerConfig {
    /// Read configuration from the environment, falling back to local
    /// defaults.
    pub fn from_env() -> Self {
        let token_secret = match std::env::var("NOTENOVA_TOKEN_SECRET") {
            Ok(secret) if !secret.is_empty() => secret,
            _ => {
                warn!(
                    subsystem = "api",
                    component = "config",
                    "NOTENOVA_TOKEN_SECRET is not set; using the development fallback"
                );
                DEV_TOKEN_SECRET.to_string()
            }
        };

        Self {
            bind: std::env::var("NOTENOVA_BIND").unwrap_or_else(|_| SERVER_BIND.to_string()),
            database_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| DATABASE_URL.to_string()),
            token_secret,
        }
    }
}
