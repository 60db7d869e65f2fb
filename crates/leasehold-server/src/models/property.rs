//! Properties.

use super::{stored_id, stored_opt_id};
use crate::error::ApiError;
use anyhow::anyhow;
use chrono::{DateTime, Utc};
use leasehold_common_core::{PropertyId, UserId};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyType {
    House,
    Apartment,
    Commercial,
    Land,
    Bungalow,
    Duplex,
    Townhouse,
    Studio,
    Cottage,
    Penthouse,
    Other,
}

impl PropertyType {
    pub const ALL: [PropertyType; 11] = [
        Self::House,
        Self::Apartment,
        Self::Commercial,
        Self::Land,
        Self::Bungalow,
        Self::Duplex,
        Self::Townhouse,
        Self::Studio,
        Self::Cottage,
        Self::Penthouse,
        Self::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::House => "house",
            Self::Apartment => "apartment",
            Self::Commercial => "commercial",
            Self::Land => "land",
            Self::Bungalow => "bungalow",
            Self::Duplex => "duplex",
            Self::Townhouse => "townhouse",
            Self::Studio => "studio",
            Self::Cottage => "cottage",
            Self::Penthouse => "penthouse",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PropertyType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("unknown property type: {s}"))
    }
}

/// A property, the root of every ownership chain.
#[derive(Debug, Clone, Serialize)]
pub struct Property {
    pub id: PropertyId,
    pub owner_id: UserId,
    pub name: String,
    pub description: String,
    pub longitude: Option<f64>,
    pub latitude: Option<f64>,
    pub property_type: PropertyType,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
    pub created_by: UserId,
    pub updated_by: Option<UserId>,
    pub deleted_by: Option<UserId>,
}

#[derive(Debug, sqlx::FromRow)]
pub struct PropertyRow {
    pub id: String,
    pub owner_id: String,
    pub name: String,
    pub description: String,
    pub longitude: Option<f64>,
    pub latitude: Option<f64>,
    pub property_type: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
    pub created_by: String,
    pub updated_by: Option<String>,
    pub deleted_by: Option<String>,
}

impl TryFrom<PropertyRow> for Property {
    type Error = ApiError;

    fn try_from(row: PropertyRow) -> Result<Self, Self::Error> {
        let property_type = row
            .property_type
            .parse()
            .map_err(|e: String| ApiError::Internal(anyhow!(e)))?;

        Ok(Self {
            id: stored_id("properties.id", &row.id)?,
            owner_id: stored_id("properties.owner_id", &row.owner_id)?,
            name: row.name,
            description: row.description,
            longitude: row.longitude,
            latitude: row.latitude,
            property_type,
            created_at: row.created_at,
            updated_at: row.updated_at,
            deleted_at: row.deleted_at,
            created_by: stored_id("properties.created_by", &row.created_by)?,
            updated_by: stored_opt_id("properties.updated_by", row.updated_by.as_deref())?,
            deleted_by: stored_opt_id("properties.deleted_by", row.deleted_by.as_deref())?,
        })
    }
}
