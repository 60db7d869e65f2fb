//! API error types.

use axum::http::StatusCode;
use leasehold_access::DenyReason;
use std::collections::HashMap;
use thiserror::Error;

/// Result type for API operations.
pub type ApiResult<T> = Result<T, ApiError>;

/// API error enum covering all error cases.
#[derive(Debug, Error)]
pub enum ApiError {
    // 400 Bad Request
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Validation failed")]
    ValidationError(HashMap<String, Vec<String>>),

    #[error("Invalid query parameter: {0}")]
    InvalidQueryParam(String),

    // 401 Unauthorized
    #[error("Authentication required")]
    Unauthorized,

    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token")]
    InvalidToken,

    // 403 Forbidden
    #[error("Access denied")]
    Forbidden,

    #[error("{0}")]
    ResourceAccessDenied(DenyReason),

    // 404 Not Found
    #[error("{0} not found")]
    NotFound(String),

    #[error("Resource not found")]
    ResourceNotFound { resource: String, id: String },

    // 409 Conflict
    #[error("Duplicate entry: {0}")]
    DuplicateEntry(String),

    // 500 Internal Server Error
    #[error("Internal server error")]
    Internal(#[source] anyhow::Error),

    #[error("Database error")]
    Database(#[source] sqlx::Error),
}

impl ApiError {
    /// Get HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) | Self::ValidationError(_) | Self::InvalidQueryParam(_) => {
                StatusCode::BAD_REQUEST
            }

            Self::Unauthorized | Self::TokenExpired | Self::InvalidToken => {
                StatusCode::UNAUTHORIZED
            }

            Self::Forbidden | Self::ResourceAccessDenied(_) => StatusCode::FORBIDDEN,

            Self::NotFound(_) | Self::ResourceNotFound { .. } => StatusCode::NOT_FOUND,

            Self::DuplicateEntry(_) => StatusCode::CONFLICT,

            Self::Internal(_) | Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get error code for client handling.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::BadRequest(_) => "bad_request",
            Self::ValidationError(_) => "validation_error",
            Self::InvalidQueryParam(_) => "invalid_query_param",
            Self::Unauthorized => "unauthorized",
            Self::TokenExpired => "token_expired",
            Self::InvalidToken => "invalid_token",
            Self::Forbidden => "forbidden",
            Self::ResourceAccessDenied(_) => "resource_access_denied",
            Self::NotFound(_) => "not_found",
            Self::ResourceNotFound { .. } => "resource_not_found",
            Self::DuplicateEntry(_) => "duplicate_entry",
            Self::Internal(_) => "internal_error",
            Self::Database(_) => "database_error",
        }
    }

    /// Check if this is a client error (4xx).
    pub fn is_client_error(&self) -> bool {
        self.status_code().is_client_error()
    }

    /// Check if this is a server error (5xx).
    pub fn is_server_error(&self) -> bool {
        self.status_code().is_server_error()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(ApiError::Unauthorized.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            ApiError::ResourceAccessDenied(DenyReason::NotOwner).status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ApiError::ResourceNotFound {
                resource: "unit".into(),
                id: "x".into()
            }
            .status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(ApiError::DuplicateEntry("lease".into()).status_code(), StatusCode::CONFLICT);
        assert!(ApiError::Internal(anyhow::anyhow!("boom")).is_server_error());
        assert_eq!(
            ApiError::InvalidQueryParam("page".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert!(ApiError::BadRequest("x".into()).is_client_error());
    }

    #[test]
    fn test_denial_message_comes_from_reason() {
        let err = ApiError::ResourceAccessDenied(DenyReason::NotLandlord);
        assert_eq!(err.to_string(), "only landlords can add properties");
        assert_eq!(err.error_code(), "resource_access_denied");
    }
}
