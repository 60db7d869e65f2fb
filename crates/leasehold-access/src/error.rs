//! Access control errors.

use crate::policy::DenyReason;
use crate::resource::ResourceRef;
use thiserror::Error;

/// Terminal outcome of a failed access check.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessError {
    /// A resource on the target's ownership chain does not exist.
    #[error("{0} not found")]
    NotFound(ResourceRef),

    /// The resource exists but the principal may not act on it.
    #[error("access denied: {0}")]
    Forbidden(DenyReason),
}

impl AccessError {
    /// Whether this is a missing-resource error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}
