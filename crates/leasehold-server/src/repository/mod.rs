//! Data access layer over SQLite.
//!
//! Each repository owns a cheap clone of the pool. Listing methods return
//! the requested page together with the total number of matching rows.

mod image;
mod lease;
mod ownership;
mod property;
mod role;
mod unit;
mod user;

pub use image::ImageRepository;
pub use lease::LeaseRepository;
pub use ownership::load_ownership_chain;
pub use property::PropertyRepository;
pub use role::RoleRepository;
pub use unit::UnitRepository;
pub use user::{NewUser, UserRepository};

use crate::response::PaginationParams;

/// A page of records and the total they were cut from.
pub type Page<T> = (Vec<T>, u64);

pub(crate) fn limit_offset(params: &PaginationParams) -> (i64, i64) {
    (i64::from(params.limit()), params.offset() as i64)
}
