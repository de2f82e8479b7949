//! Registration, login, and token verification endpoints.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use nova_core::PublicUser;

use crate::error::ApiError;
use crate::extractors::Bearer;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
struct SessionResponse {
    message: &'static str,
    user: PublicUser,
    token: String,
}

/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let session = state
        .auth
        .register(&req.username, &req.email, &req.password)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(SessionResponse {
            message: "User registered successfully",
            user: session.user,
            token: session.token,
        }),
    ))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let session = state.auth.login(&req.email, &req.password).await?;

    Ok(Json(SessionResponse {
        message: "Login successful",
        user: session.user,
        token: session.token,
    }))
}

/// GET /api/auth/verify
///
/// Verifies the token and confirms the user row still exists.
pub async fn verify(
    State(state): State<AppState>,
    Bearer(token): Bearer,
) -> Result<impl IntoResponse, ApiError> {
    let user = state.auth.verify(&token).await?;

    Ok(Json(serde_json::json!({
        "message": "Token is valid",
        "user": user,
    })))
}
