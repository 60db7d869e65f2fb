//! Standard API response types.

use axum::{
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Standard success envelope. Failures are rendered by `ApiError`.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    /// Always true; mirrors the error envelope's `success: false`.
    pub success: bool,
    /// Response data.
    pub data: T,
    /// Response metadata.
    pub meta: ResponseMeta,
}

/// Response metadata.
#[derive(Debug, Serialize)]
pub struct ResponseMeta {
    /// Request ID for tracing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    /// Response timestamp.
    pub timestamp: String,
}

impl<T> ApiResponse<T> {
    /// Create a successful response.
    pub fn success(data: T) -> Self {
        Self::success_with_meta(data, ResponseMeta::now())
    }

    /// Create a successful response with metadata.
    pub fn success_with_meta(data: T, meta: ResponseMeta) -> Self {
        Self {
            success: true,
            data,
            meta,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

impl ResponseMeta {
    /// Create metadata with current timestamp.
    pub fn now() -> Self {
        Self {
            request_id: None,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Add request ID.
    pub fn with_request_id(mut self, id: impl Into<String>) -> Self {
        self.request_id = Some(id.into());
        self
    }
}
