//! Application error type mapping to HTTP status codes and JSON bodies.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use rover_types::error::PositionError;
use rover_types::validation::ValidationErrors;

use crate::http::response::{FailureResponse, ValidationFailure};

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// One or more request fields failed validation.
    Validation(ValidationErrors),
    /// Position-related errors.
    Position(PositionError),
    /// Generic internal error.
    Internal(String),
}

impl From<ValidationErrors> for AppError {
    fn from(e: ValidationErrors) -> Self {
        AppError::Validation(e)
    }
}

impl From<PositionError> for AppError {
    fn from(e: PositionError) -> Self {
        AppError::Position(e)
    }
}

fn failure(status: StatusCode, message: String) -> Response {
    (
        status,
        Json(FailureResponse {
            success: false,
            message,
        }),
    )
        .into_response()
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::Validation(errors) => {
                tracing::debug!(%errors, "rejected invalid position");
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    Json(ValidationFailure {
                        success: false,
                        errors,
                    }),
                )
                    .into_response()
            }
            AppError::Position(PositionError::Storage(e)) => {
                // Infrastructure details stay in the logs.
                tracing::error!(error = %e, "position storage failure");
                failure(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            AppError::Position(e) => failure(StatusCode::UNPROCESSABLE_ENTITY, e.to_string()),
            AppError::Internal(msg) => {
                tracing::error!(error = %msg, "internal error");
                failure(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rover_types::error::RepositoryError;

    #[test]
    fn test_validation_maps_to_422() {
        let mut errors = ValidationErrors::new();
        errors.add("x", "The x field is required.");
        let resp = AppError::from(errors).into_response();
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_storage_maps_to_500() {
        let err = PositionError::Storage(RepositoryError::Connection("gone".to_string()));
        let resp = AppError::from(err).into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_invalid_session_maps_to_422() {
        let resp = AppError::from(PositionError::InvalidSession).into_response();
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
