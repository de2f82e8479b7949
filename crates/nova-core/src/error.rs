//! Error types for NoteNova.

use thiserror::Error;

/// Result type alias using NoteNova's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for NoteNova operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation failed (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Malformed or missing input
    #[error("Validation error: {0}")]
    Validation(String),

    /// Duplicate username/email or other uniqueness violation
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Bad credentials or token
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Resource missing, or not owned by the caller
    #[error("Not found: {0}")]
    NotFound(String),

    /// Uploaded file type is not handled
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// A document parser failed on the uploaded file
    #[error("Extraction error: {0}")]
    Extraction(String),

    /// The hosted language model call failed
    #[error("AI service error: {0}")]
    AiService(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// HTTP/network request failed
    #[error("Request error: {0}")]
    Request(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// File I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::Request(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_validation() {
        let err = Error::Validation("title is required".to_string());
        assert_eq!(err.to_string(), "Validation error: title is required");
    }

    #[test]
    fn test_error_display_conflict() {
        let err = Error::Conflict("Email already in use".to_string());
        assert_eq!(err.to_string(), "Conflict: Email already in use");
    }

    #[test]
    fn test_error_display_unauthorized() {
        let err = Error::Unauthorized("Invalid email or password".to_string());
        assert_eq!(err.to_string(), "Unauthorized: Invalid email or password");
    }

    #[test]
    fn test_error_display_not_found() {
        let err = Error::NotFound("note".to_string());
        assert_eq!(err.to_string(), "Not found: note");
    }

    #[test]
    fn test_error_display_unsupported_format() {
        let err = Error::UnsupportedFormat("image/png".to_string());
        assert_eq!(err.to_string(), "Unsupported format: image/png");
    }

    #[test]
    fn test_error_display_ai_service() {
        let err = Error::AiService("model timeout".to_string());
        assert_eq!(err.to_string(), "AI service error: model timeout");
    }

    #[test]
    fn test_from_serde_json_error() {
        let json_err = serde_json::from_str::<i32>("not a number").unwrap_err();
        let err: Error = json_err.into();
        match err {
            Error::Serialization(msg) => assert!(!msg.is_empty()),
            _ => panic!("Expected Serialization error"),
        }
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(err.to_string().contains("I/O error:"));
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}

        assert_send::<Error>();
        assert_sync::<Error>();
    }
}
