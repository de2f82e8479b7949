//! Request extractors for bearer-token authentication.

use axum::extract::FromRequestParts;
use axum::http::header;
use axum::http::request::Parts;
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;

/// The raw bearer token from the Authorization header. Missing or
/// malformed headers reject with 401.
#[derive(Debug, Clone)]
pub struct Bearer(pub String);

#[axum::async_trait]
impl FromRequestParts<AppState> for Bearer {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header_value = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok());

        match header_value {
            Some(value) if value.starts_with("Bearer ") => {
                Ok(Bearer(value.trim_start_matches("Bearer ").trim().to_string()))
            }
            _ => Err(ApiError::Unauthorized(
                "Authorization token required".to_string(),
            )),
        }
    }
}

/// The authenticated user, from a statelessly verified token. Signature and
/// expiry are checked here; the `/api/auth/verify` endpoint additionally
/// confirms the user row still exists.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: Uuid,
    pub email: String,
    pub username: String,
}

#[axum::async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Bearer(token) = Bearer::from_request_parts(parts, state).await?;

        let claims = state
            .auth
            .verify_token(&token)
            .map_err(|_| ApiError::Forbidden("Invalid or expired token".to_string()))?;

        Ok(AuthUser {
            id: claims.sub,
            email: claims.email,
            username: claims.username,
        })
    }
}
