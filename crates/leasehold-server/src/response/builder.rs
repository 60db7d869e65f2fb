//! Response builder utilities.

use super::types::{ApiResponse, ResponseMeta};
use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Builder for constructing API responses.
pub struct ResponseBuilder<T> {
    status: StatusCode,
    data: T,
    meta: ResponseMeta,
    headers: Vec<(header::HeaderName, String)>,
}

impl<T: Serialize> ResponseBuilder<T> {
    /// Create a new response builder.
    pub fn new(data: T) -> Self {
        Self {
            status: StatusCode::OK,
            data,
            meta: ResponseMeta::now(),
            headers: Vec::new(),
        }
    }

    /// Set HTTP status code.
    pub fn status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }

    /// Add request ID to metadata.
    pub fn request_id(mut self, id: impl Into<String>) -> Self {
        self.meta.request_id = Some(id.into());
        self
    }

    /// Add a custom header.
    pub fn header(mut self, name: header::HeaderName, value: impl Into<String>) -> Self {
        self.headers.push((name, value.into()));
        self
    }

    /// Build the response.
    pub fn build(self) -> Response {
        let response = ApiResponse::success_with_meta(self.data, self.meta);
        let mut res = (self.status, Json(response)).into_response();

        for (name, value) in self.headers {
            if let Ok(v) = HeaderValue::from_str(&value) {
                res.headers_mut().insert(name, v);
            }
        }

        res
    }
}

/// Create a 200 OK response.
pub fn ok<T: Serialize>(data: T) -> Response {
    ResponseBuilder::new(data).build()
}

/// Create a 201 Created response with a `Location` header.
pub fn created<T: Serialize>(data: T, location: impl Into<String>) -> Response {
    ResponseBuilder::new(data)
        .status(StatusCode::CREATED)
        .header(header::LOCATION, location)
        .build()
}

/// Create a 204 No Content response.
pub fn no_content() -> Response {
    StatusCode::NO_CONTENT.into_response()
}
