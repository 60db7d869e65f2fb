//! Property images. Only the stored path is kept; bytes live elsewhere.

use super::stored_id;
use crate::error::ApiError;
use chrono::{DateTime, Utc};
use leasehold_common_core::{ImageId, PropertyId};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct PropertyImage {
    pub id: ImageId,
    pub property_id: PropertyId,
    pub image: String,
    pub uploaded_at: DateTime<Utc>,
}

#[derive(Debug, sqlx::FromRow)]
pub struct ImageRow {
    pub id: String,
    pub property_id: String,
    pub image: String,
    pub uploaded_at: DateTime<Utc>,
}

impl TryFrom<ImageRow> for PropertyImage {
    type Error = ApiError;

    fn try_from(row: ImageRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: stored_id("property_images.id", &row.id)?,
            property_id: stored_id("property_images.property_id", &row.property_id)?,
            image: row.image,
            uploaded_at: row.uploaded_at,
        })
    }
}
