//! Domain records and their SQLite row mappings.
//!
//! Rows keep ids and decimals in their stored TEXT form; conversion into a
//! record fails with an internal error when stored data does not parse.

pub mod image;
pub mod lease;
pub mod property;
pub mod role;
pub mod unit;
pub mod user;

pub use image::{ImageRow, PropertyImage};
pub use lease::{Lease, LeaseRow};
pub use property::{Property, PropertyRow, PropertyType};
pub use role::{Role, RoleRow};
pub use unit::{Unit, UnitRow};
pub use user::{User, UserRow};

use crate::error::ApiError;
use anyhow::anyhow;
use leasehold_common_core::IdParseError;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Parse a stored id column.
pub(crate) fn stored_id<T>(column: &str, value: &str) -> Result<T, ApiError>
where
    T: FromStr<Err = IdParseError>,
{
    value
        .parse()
        .map_err(|e| ApiError::Internal(anyhow!("corrupt {column} column: {e}")))
}

/// Parse an optional stored id column.
pub(crate) fn stored_opt_id<T>(column: &str, value: Option<&str>) -> Result<Option<T>, ApiError>
where
    T: FromStr<Err = IdParseError>,
{
    value.map(|v| stored_id(column, v)).transpose()
}

/// Parse a stored decimal column.
pub(crate) fn stored_decimal(column: &str, value: &str) -> Result<Decimal, ApiError> {
    Decimal::from_str(value)
        .map_err(|e| ApiError::Internal(anyhow!("corrupt {column} column: {e}")))
}

/// Parse an optional stored decimal column.
pub(crate) fn stored_opt_decimal(
    column: &str,
    value: Option<&str>,
) -> Result<Option<Decimal>, ApiError> {
    value.map(|v| stored_decimal(column, v)).transpose()
}
