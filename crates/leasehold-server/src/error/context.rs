//! Error context utilities.

use super::types::ApiError;

/// Extension trait turning a missing value into a 404.
pub trait ErrorContext<T> {
    /// Map absence to `ApiError::NotFound(resource)`.
    fn not_found(self, resource: impl Into<String>) -> Result<T, ApiError>;
}

impl<T> ErrorContext<T> for Option<T> {
    fn not_found(self, resource: impl Into<String>) -> Result<T, ApiError> {
        self.ok_or_else(|| ApiError::NotFound(resource.into()))
    }
}

/// Create a not found error for a specific resource.
pub fn not_found(resource: &str, id: &str) -> ApiError {
    ApiError::ResourceNotFound {
        resource: resource.to_string(),
        id: id.to_string(),
    }
}
