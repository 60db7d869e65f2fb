//! HTTP handlers.
//!
//! Every handler resolves its target before authorizing, and authorizes
//! before looking at the request body. A missing record is therefore a 404
//! even for callers who could not have touched it, and an unauthorized
//! caller gets a 403 even when the body is malformed.

pub mod auth;
pub mod images;
pub mod leases;
pub mod properties;
pub mod roles;
pub mod units;

use crate::error::{ApiError, ApiResult};
use crate::response::no_content;
use axum::response::Response;
use leasehold_access::{AccessError, ResourceRef};

/// Record that vanished between authorization and use.
pub(crate) fn gone(resource: impl Into<ResourceRef>) -> ApiError {
    AccessError::NotFound(resource.into()).into()
}

/// 204 when the row was removed, 404 when it had already vanished.
pub(crate) fn deleted(removed: bool, resource: impl Into<ResourceRef>) -> ApiResult<Response> {
    if removed {
        Ok(no_content())
    } else {
        Err(gone(resource))
    }
}
