//! Roles.

use super::stored_id;
use crate::error::ApiError;
use leasehold_common_core::RoleId;
use serde::Serialize;

/// A named role tag.
#[derive(Debug, Clone, Serialize)]
pub struct Role {
    pub id: RoleId,
    pub name: String,
    pub description: String,
}

#[derive(Debug, sqlx::FromRow)]
pub struct RoleRow {
    pub id: String,
    pub name: String,
    pub description: String,
}

impl TryFrom<RoleRow> for Role {
    type Error = ApiError;

    fn try_from(row: RoleRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: stored_id("roles.id", &row.id)?,
            name: row.name,
            description: row.description,
        })
    }
}
