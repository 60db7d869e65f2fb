//! Error handling for the Leasehold API server.

pub mod context;
pub mod response;
pub mod types;

pub use context::{not_found, ErrorContext};
pub use types::{ApiError, ApiResult};
