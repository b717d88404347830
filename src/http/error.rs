//! HTTP error handling and response types.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::services::SchedulingError;

/// API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Identifier of the assignment holding the contested slot, for conflict
    /// responses
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conflict_with: Option<i64>,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            conflict_with: None,
        }
    }

    pub fn with_conflict(mut self, with: i64) -> Self {
        self.conflict_with = Some(with);
        self
    }
}

/// Application error type for HTTP handlers.
#[derive(Debug)]
pub enum AppError {
    /// No viewer identity on the request
    Unauthenticated(String),
    /// Viewer role insufficient for the operation
    Forbidden(String),
    /// Resource not found
    NotFound(String),
    /// Request body or query could not be interpreted
    BadRequest(String),
    /// Input was well-formed but violated a validation rule
    Unprocessable(String),
    /// Slot exclusivity violation
    Conflict { message: String, with: i64 },
    /// Internal server error
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            AppError::Unauthenticated(msg) => {
                (StatusCode::UNAUTHORIZED, ApiError::new("UNAUTHENTICATED", msg))
            }
            AppError::Forbidden(msg) => (StatusCode::FORBIDDEN, ApiError::new("FORBIDDEN", msg)),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, ApiError::new("NOT_FOUND", msg)),
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, ApiError::new("BAD_REQUEST", msg))
            }
            AppError::Unprocessable(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ApiError::new("VALIDATION_FAILED", msg),
            ),
            AppError::Conflict { message, with } => (
                StatusCode::CONFLICT,
                ApiError::new("SCHEDULE_CONFLICT", message).with_conflict(with),
            ),
            AppError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::new("INTERNAL_ERROR", msg),
            ),
        };

        (status, Json(error)).into_response()
    }
}

impl From<SchedulingError> for AppError {
    fn from(err: SchedulingError) -> Self {
        match err {
            SchedulingError::Validation(msg) => AppError::Unprocessable(msg),
            SchedulingError::NotFound(msg) => AppError::NotFound(msg),
            SchedulingError::LabConflict { with } | SchedulingError::InstructorConflict { with } => {
                AppError::Conflict {
                    message: err.to_string(),
                    with: with.value(),
                }
            }
            SchedulingError::Unauthorized { .. } => AppError::Forbidden(err.to_string()),
            SchedulingError::Repository(e) => AppError::Internal(e.to_string()),
        }
    }
}
