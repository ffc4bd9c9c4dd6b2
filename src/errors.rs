use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use async_graphql::ErrorExtensions;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum AppError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl AppError {
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::InvalidRequest(_) => "INVALID_REQUEST",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Unauthorized(_) => "UNAUTHORIZED",
            AppError::DatabaseError(_) | AppError::InternalError(_) => "SERVER_ERROR",
        }
    }

    /// Message safe to show to the caller. Server-side failures are reported generically.
    pub fn public_message(&self) -> String {
        match self {
            AppError::InvalidRequest(msg)
            | AppError::NotFound(msg)
            | AppError::Unauthorized(msg) => msg.clone(),
            AppError::DatabaseError(_) | AppError::InternalError(_) => {
                "An unexpected error occurred".to_string()
            }
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

impl From<&AppError> for ErrorResponse {
    fn from(err: &AppError) -> Self {
        ErrorResponse {
            code: err.error_code().to_string(),
            message: err.public_message(),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if self.status_code().is_server_error() {
            log::error!("Request failed: {}", self);
        }
        HttpResponse::build(self.status_code()).json(ErrorResponse::from(self))
    }
}

impl From<mongodb::error::Error> for AppError {
    fn from(err: mongodb::error::Error) -> Self {
        AppError::DatabaseError(err.to_string())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::InvalidRequest(err.to_string())
    }
}

impl ErrorExtensions for AppError {
    fn extend(&self) -> async_graphql::Error {
        async_graphql::Error::new(self.public_message()).extend_with(|_err, e| {
            e.set("code", self.error_code());
        })
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        assert_eq!(
            AppError::InvalidRequest("test".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::NotFound("test".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::DatabaseError("test".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(AppError::InvalidRequest("x".into()).error_code(), "INVALID_REQUEST");
        assert_eq!(AppError::DatabaseError("x".into()).error_code(), "SERVER_ERROR");
        assert_eq!(AppError::InternalError("x".into()).error_code(), "SERVER_ERROR");
    }

    #[test]
    fn test_server_errors_hide_internals() {
        let err = AppError::DatabaseError("connection refused on 10.0.0.3".into());
        let body = ErrorResponse::from(&err);

        assert_eq!(body.code, "SERVER_ERROR");
        assert!(!body.message.contains("10.0.0.3"));
    }

    #[test]
    fn test_error_messages() {
        let err = AppError::InvalidRequest("expected 10 answers".into());
        assert_eq!(err.to_string(), "Invalid request: expected 10 answers");
        assert_eq!(ErrorResponse::from(&err).message, "expected 10 answers");
    }
}
