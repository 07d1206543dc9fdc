//! HTTP error handling and response types.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::utils::error::RegistryError;

pub const DEPARTMENT_NOT_FOUND: &str = "Department Not Found";
pub const COURSE_NOT_FOUND: &str = "Course Not Found";

/// API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

/// Application error type for HTTP handlers.
#[derive(Debug)]
pub enum AppError {
    DepartmentNotFound,
    CourseNotFound,
    /// Invalid request (validation error or refused operation)
    BadRequest(String),
    /// Anything else, e.g. a failed save
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            AppError::DepartmentNotFound => (
                StatusCode::NOT_FOUND,
                ApiError::new("NOT_FOUND", DEPARTMENT_NOT_FOUND),
            ),
            AppError::CourseNotFound => (
                StatusCode::NOT_FOUND,
                ApiError::new("NOT_FOUND", COURSE_NOT_FOUND),
            ),
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, ApiError::new("BAD_REQUEST", msg))
            }
            AppError::Internal(msg) => {
                tracing::error!("Request failed: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiError::new("INTERNAL_ERROR", "An Error has occurred"),
                )
            }
        };

        (status, Json(error)).into_response()
    }
}

impl From<RegistryError> for AppError {
    fn from(err: RegistryError) -> Self {
        match err {
            RegistryError::InvalidArgument { message } => AppError::BadRequest(message),
            other => AppError::Internal(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            AppError::DepartmentNotFound.into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::CourseNotFound.into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::from(RegistryError::invalid_argument("bad")).into_response().status(),
            StatusCode::BAD_REQUEST
        );
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        assert_eq!(
            AppError::from(RegistryError::from(io)).into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
