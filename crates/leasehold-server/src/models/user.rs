//! Users, as provisioned by the identity service.

use super::{stored_id, stored_opt_id};
use crate::error::ApiError;
use chrono::{DateTime, Utc};
use leasehold_access::Principal;
use leasehold_common_core::{RoleId, UserId};
use serde::Serialize;

/// A user together with its role name.
#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub role_id: Option<RoleId>,
    pub role: Option<String>,
    pub is_staff: bool,
    pub date_joined: DateTime<Utc>,
}

impl User {
    /// Snapshot of the attributes the access rules look at.
    pub fn principal(&self) -> Principal {
        Principal::new(self.id)
            .with_staff(self.is_staff)
            .with_optional_role(self.role.clone())
    }
}

/// `users` joined with `roles.name`.
#[derive(Debug, sqlx::FromRow)]
pub struct UserRow {
    pub id: String,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub role_id: Option<String>,
    pub role_name: Option<String>,
    pub is_staff: bool,
    pub date_joined: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = ApiError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: stored_id("users.id", &row.id)?,
            username: row.username,
            email: row.email,
            first_name: row.first_name,
            last_name: row.last_name,
            phone: row.phone,
            role_id: stored_opt_id("users.role_id", row.role_id.as_deref())?,
            role: row.role_name,
            is_staff: row.is_staff,
            date_joined: row.date_joined,
        })
    }
}
