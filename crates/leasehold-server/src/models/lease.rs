//! Leases binding a tenant to a unit.

use super::{stored_decimal, stored_id};
use crate::error::ApiError;
use chrono::{DateTime, NaiveDate, Utc};
use leasehold_common_core::{LeaseId, UnitId, UserId};
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct Lease {
    pub id: LeaseId,
    pub unit_id: UnitId,
    pub tenant_id: UserId,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub rent_amount: Decimal,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, sqlx::FromRow)]
pub struct LeaseRow {
    pub id: String,
    pub unit_id: String,
    pub tenant_id: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub rent_amount: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<LeaseRow> for Lease {
    type Error = ApiError;

    fn try_from(row: LeaseRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: stored_id("leases.id", &row.id)?,
            unit_id: stored_id("leases.unit_id", &row.unit_id)?,
            tenant_id: stored_id("leases.tenant_id", &row.tenant_id)?,
            start_date: row.start_date,
            end_date: row.end_date,
            rent_amount: stored_decimal("leases.rent_amount", &row.rent_amount)?,
            is_active: row.is_active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}
