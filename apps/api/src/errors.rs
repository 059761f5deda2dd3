use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::dispatch::classify::ErrorClass;
use crate::dispatch::{TerminalFailure, ValidationError};

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Every model tier failed on overload or rate limiting.
    #[error("Model unavailable: {0}")]
    ModelUnavailable(String),

    #[error("LLM error: {0}")]
    Llm(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::Validation(err.to_string())
    }
}

impl From<TerminalFailure> for AppError {
    fn from(failure: TerminalFailure) -> Self {
        match failure.last_class {
            ErrorClass::Transient => AppError::ModelUnavailable(failure.to_string()),
            ErrorClass::Terminal => AppError::Llm(failure.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Database(e) => {
                tracing::error!("Database error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DATABASE_ERROR",
                    "A database error occurred".to_string(),
                )
            }
            AppError::ModelUnavailable(msg) => {
                tracing::warn!("Model unavailable: {msg}");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "MODEL_UNAVAILABLE",
                    "The AI service is busy right now. Please try again in a few minutes."
                        .to_string(),
                )
            }
            AppError::Llm(msg) => {
                tracing::error!("LLM error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "LLM_ERROR",
                    "An AI processing error occurred. Please try again later.".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn failure(message: &str) -> TerminalFailure {
        TerminalFailure::new("review-resume", "flash", 2, message.to_string())
    }

    #[test]
    fn test_exhausted_transient_failure_maps_to_503() {
        let err = AppError::from(failure("API error (status 503): overloaded"));
        assert!(matches!(err, AppError::ModelUnavailable(_)));
        assert_eq!(err.into_response().status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn test_terminal_failure_maps_to_500() {
        let err = AppError::from(failure("model output rejected: field `summary` is missing"));
        assert!(matches!(err, AppError::Llm(_)));
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_validation_error_maps_to_400() {
        let err = AppError::from(ValidationError::new("topic", "must not be empty"));
        assert_eq!(err.to_string(), "Validation error: topic: must not be empty");
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }
}
