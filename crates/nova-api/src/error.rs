//! Error-to-HTTP mapping.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use tracing::error;

/// API-layer error with an HTTP status. Every variant renders as a JSON
/// body of the form `{"error": "<message>"}`.
#[derive(Debug)]
pub enum ApiError {
    /// Unexpected failure (database, I/O, serialization).
    Internal(nova_core::Error),
    BadRequest(String),
    Unauthorized(String),
    Forbidden(String),
    NotFound(String),
    Conflict(String),
    /// The hosted model failed; distinct status so clients can tell an
    /// upstream outage from a server fault.
    AiService(String),
}

impl From<nova_core::Error> for ApiError {
    fn from(err: nova_core::Error) -> Self {
        use nova_core::Error;
        match err {
            Error::Validation(msg) => ApiError::BadRequest(msg),
            Error::UnsupportedFormat(msg) => ApiError::BadRequest(msg),
            Error::Extraction(msg) => ApiError::BadRequest(msg),
            Error::Conflict(msg) => ApiError::Conflict(msg),
            Error::Unauthorized(msg) => ApiError::Unauthorized(msg),
            Error::NotFound(msg) => ApiError::NotFound(msg),
            Error::AiService(msg) => ApiError::AiService(msg),
            other => ApiError::Internal(other),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            ApiError::Internal(err) => {
                error!(
                    subsystem = "api",
                    component = "error",
                    error = %err,
                    "Request failed with internal error"
                );
                (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
            }
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::AiService(msg) => (StatusCode::BAD_GATEWAY, msg),
        };

        let body = Json(serde_json::json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}
