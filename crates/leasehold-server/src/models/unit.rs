//! Units within a property.

use super::{stored_id, stored_opt_decimal, stored_opt_id};
use crate::error::ApiError;
use chrono::{DateTime, Utc};
use leasehold_access::UnitVisibility;
use leasehold_common_core::{PropertyId, UnitId, UserId};
use rust_decimal::Decimal;
use serde::Serialize;

/// A rentable unit.
#[derive(Debug, Clone, Serialize)]
pub struct Unit {
    pub id: UnitId,
    pub property_id: PropertyId,
    pub name: String,
    pub floor: String,
    pub description: String,
    pub is_occupied: bool,
    pub amenities: String,
    pub bedrooms: u32,
    pub bathrooms: u32,
    pub parking_space: bool,
    pub parking_slots: u32,
    pub is_public: bool,
    pub price: Option<Decimal>,
    pub service_charge: Option<Decimal>,
    pub security_deposit: Option<Decimal>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
    pub created_by: UserId,
    pub updated_by: Option<UserId>,
    pub deleted_by: Option<UserId>,
}

impl Unit {
    pub fn visibility(&self) -> UnitVisibility {
        UnitVisibility {
            is_occupied: self.is_occupied,
            is_public: self.is_public,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
pub struct UnitRow {
    pub id: String,
    pub property_id: String,
    pub name: String,
    pub floor: String,
    pub description: String,
    pub is_occupied: bool,
    pub amenities: String,
    pub bedrooms: u32,
    pub bathrooms: u32,
    pub parking_space: bool,
    pub parking_slots: u32,
    pub is_public: bool,
    pub price: Option<String>,
    pub service_charge: Option<String>,
    pub security_deposit: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
    pub created_by: String,
    pub updated_by: Option<String>,
    pub deleted_by: Option<String>,
}

impl TryFrom<UnitRow> for Unit {
    type Error = ApiError;

    fn try_from(row: UnitRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: stored_id("units.id", &row.id)?,
            property_id: stored_id("units.property_id", &row.property_id)?,
            name: row.name,
            floor: row.floor,
            description: row.description,
            is_occupied: row.is_occupied,
            amenities: row.amenities,
            bedrooms: row.bedrooms,
            bathrooms: row.bathrooms,
            parking_space: row.parking_space,
            parking_slots: row.parking_slots,
            is_public: row.is_public,
            price: stored_opt_decimal("units.price", row.price.as_deref())?,
            service_charge: stored_opt_decimal("units.service_charge", row.service_charge.as_deref())?,
            security_deposit: stored_opt_decimal(
                "units.security_deposit",
                row.security_deposit.as_deref(),
            )?,
            created_at: row.created_at,
            updated_at: row.updated_at,
            deleted_at: row.deleted_at,
            created_by: stored_id("units.created_by", &row.created_by)?,
            updated_by: stored_opt_id("units.updated_by", row.updated_by.as_deref())?,
            deleted_by: stored_opt_id("units.deleted_by", row.deleted_by.as_deref())?,
        })
    }
}
