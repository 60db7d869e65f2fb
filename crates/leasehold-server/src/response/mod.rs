//! Response types and utilities.

pub mod builder;
pub mod pagination;
pub mod types;

pub use builder::*;
pub use pagination::*;
pub use types::*;
