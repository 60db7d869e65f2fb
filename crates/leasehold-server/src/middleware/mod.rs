//! Middleware for the Leasehold API server.

pub mod auth;
pub mod cors;

pub use auth::{Auth, AuthLayer, AuthMiddleware, AuthUser, CurrentPrincipal, MaybePrincipal};
pub use cors::cors_layer;
