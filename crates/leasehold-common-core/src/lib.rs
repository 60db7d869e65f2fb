//! Leasehold common core types.

pub mod id;

pub use id::{IdParseError, ImageId, LeaseId, PropertyId, RoleId, UnitId, UserId};
