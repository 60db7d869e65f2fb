//! Resource-ownership access control for Leasehold.
//!
//! Every decision is a pure function of three inputs:
//!
//! - a [`Principal`] snapshot (or `None` for anonymous callers),
//! - the requested [`Action`] and its [`Target`],
//! - an [`OwnershipGraph`] holding the parent references needed to reach
//!   the target's root property.
//!
//! Rules, first match wins:
//!
//! 1. staff or `admin` role: allow everything;
//! 2. creating a property requires the `landlord` role;
//! 3. creating a unit, image or lease requires the `landlord` role *and*
//!    ownership of the parent's root property;
//! 4. reading, updating or deleting requires ownership of the root property;
//! 5. listing public units is open to everyone, filtered to vacant public units;
//! 6. everything else is denied.
//!
//! Target ids are resolved before any rule runs, so an unknown id always
//! yields [`AccessError::NotFound`] rather than a denial.

pub mod error;
pub mod ownership;
pub mod policy;
pub mod principal;
pub mod resource;

pub use error::AccessError;
pub use ownership::{resolve_root_owner, root_property, OwnershipArena, OwnershipGraph};
pub use policy::{authorize, evaluate, Decision, DenyReason, ListFilter, UnitVisibility};
pub use principal::{Principal, ADMIN_ROLE, LANDLORD_ROLE, TENANT_ROLE};
pub use resource::{Action, ResourceKind, ResourceRef, Target};
