use super::{limit_offset, Page};
use crate::error::ApiResult;
use crate::models::{ImageRow, PropertyImage};
use crate::response::PaginationParams;
use chrono::Utc;
use leasehold_common_core::{ImageId, PropertyId};
use sqlx::SqlitePool;

#[derive(Clone)]
pub struct ImageRepository {
    pool: SqlitePool,
}

impl ImageRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list_for_property(
        &self,
        property: PropertyId,
        params: &PaginationParams,
    ) -> ApiResult<Page<PropertyImage>> {
        let (limit, offset) = limit_offset(params);
        let rows: Vec<ImageRow> = sqlx::query_as(
            "SELECT id, property_id, image, uploaded_at FROM property_images \
             WHERE property_id = ? ORDER BY uploaded_at, id LIMIT ? OFFSET ?",
        )
        .bind(property.to_raw())
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        let (total,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM property_images WHERE property_id = ?")
                .bind(property.to_raw())
                .fetch_one(&self.pool)
                .await?;

        let images = rows
            .into_iter()
            .map(PropertyImage::try_from)
            .collect::<ApiResult<_>>()?;
        Ok((images, total as u64))
    }

    pub async fn find(&self, id: ImageId) -> ApiResult<Option<PropertyImage>> {
        let row: Option<ImageRow> = sqlx::query_as(
            "SELECT id, property_id, image, uploaded_at FROM property_images WHERE id = ?",
        )
        .bind(id.to_raw())
        .fetch_optional(&self.pool)
        .await?;
        row.map(PropertyImage::try_from).transpose()
    }

    pub async fn create(&self, property: PropertyId, image: &str) -> ApiResult<PropertyImage> {
        let record = PropertyImage {
            id: ImageId::new(),
            property_id: property,
            image: image.to_string(),
            uploaded_at: Utc::now(),
        };

        sqlx::query(
            "INSERT INTO property_images (id, property_id, image, uploaded_at) VALUES (?, ?, ?, ?)",
        )
        .bind(record.id.to_raw())
        .bind(property.to_raw())
        .bind(&record.image)
        .bind(record.uploaded_at)
        .execute(&self.pool)
        .await?;

        Ok(record)
    }

    pub async fn delete(&self, id: ImageId) -> ApiResult<bool> {
        let result = sqlx::query("DELETE FROM property_images WHERE id = ?")
            .bind(id.to_raw())
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
