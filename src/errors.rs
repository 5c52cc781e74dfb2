// src/errors.rs
// DOCUMENTATION: Custom error types and HTTP responses
// PURPOSE: Centralized error handling for entire application

use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use serde_json::json;
use thiserror::Error;

/// Message returned when a recommendation name is already taken
pub const DUPLICATE_NAME_MESSAGE: &str = "Recommendations names must be unique";

/// Application-specific error types
/// DOCUMENTATION: Each variant maps to an HTTP status code and error response
#[derive(Error, Debug)]
pub enum RecommendationError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Unauthorized access")]
    Unauthorized,

    #[error("Forbidden access")]
    Forbidden,
}

impl RecommendationError {
    fn code(&self) -> &'static str {
        match self {
            RecommendationError::NotFound(_) => "NOT_FOUND",
            RecommendationError::Conflict(_) => "CONFLICT",
            RecommendationError::DatabaseError(_) => "DATABASE_ERROR",
            RecommendationError::ValidationError(_) => "VALIDATION_ERROR",
            RecommendationError::Unauthorized => "UNAUTHORIZED",
            RecommendationError::Forbidden => "FORBIDDEN",
        }
    }
}

impl From<sqlx::Error> for RecommendationError {
    fn from(e: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db) = &e {
            if db.is_unique_violation() {
                return RecommendationError::Conflict(DUPLICATE_NAME_MESSAGE.to_string());
            }
        }
        log::error!("Database query failed: {}", e);
        RecommendationError::DatabaseError(e.to_string())
    }
}

impl From<validator::ValidationErrors> for RecommendationError {
    fn from(e: validator::ValidationErrors) -> Self {
        RecommendationError::ValidationError(e.to_string())
    }
}

/// Convert RecommendationError to HTTP response
/// DOCUMENTATION: Maps error types to HTTP status codes and JSON responses
impl ResponseError for RecommendationError {
    fn error_response(&self) -> HttpResponse {
        let body = json!({
            "error": {
                "code": self.code(),
                "message": self.to_string(),
                "timestamp": chrono::Utc::now().to_rfc3339()
            }
        });

        HttpResponse::build(self.status_code()).json(body)
    }

    fn status_code(&self) -> StatusCode {
        match self {
            RecommendationError::NotFound(_) => StatusCode::NOT_FOUND,
            RecommendationError::Conflict(_) => StatusCode::CONFLICT,
            RecommendationError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            RecommendationError::ValidationError(_) => StatusCode::UNPROCESSABLE_ENTITY,
            RecommendationError::Unauthorized => StatusCode::UNAUTHORIZED,
            RecommendationError::Forbidden => StatusCode::FORBIDDEN,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            RecommendationError::NotFound("x".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            RecommendationError::Conflict(DUPLICATE_NAME_MESSAGE.into()).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            RecommendationError::ValidationError("bad link".into()).status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            RecommendationError::DatabaseError("down".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(RecommendationError::Unauthorized.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(RecommendationError::Forbidden.status_code(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_conflict_message_is_plain() {
        let err = RecommendationError::Conflict(DUPLICATE_NAME_MESSAGE.into());
        assert_eq!(err.to_string(), DUPLICATE_NAME_MESSAGE);
    }

    #[test]
    fn test_error_response_body() {
        let resp = RecommendationError::NotFound("Recommendation 7 not found".into()).error_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
