//! Request-side glue around the access rules.
//!
//! Handlers call [`guard`] before touching a record: it loads the target's
//! ownership chain, evaluates the rules and records the outcome.

mod audit;
mod guard;

pub use audit::{log_authz, AuthzAuditEvent};
pub use guard::{guard, require_admin};
