use super::{limit_offset, Page};
use crate::error::ApiResult;
use crate::models::{Unit, UnitRow};
use crate::request::{CreateUnitRequest, UpdateUnitRequest};
use crate::response::PaginationParams;
use chrono::Utc;
use leasehold_access::ListFilter;
use leasehold_common_core::{PropertyId, UnitId, UserId};
use sqlx::SqlitePool;

const COLUMNS: &str = "id, property_id, name, floor, description, is_occupied, amenities, \
     bedrooms, bathrooms, parking_space, parking_slots, is_public, price, service_charge, \
     security_deposit, created_at, updated_at, deleted_at, created_by, updated_by, deleted_by";

#[derive(Clone)]
pub struct UnitRepository {
    pool: SqlitePool,
}

impl UnitRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list_for_property(
        &self,
        property: PropertyId,
        params: &PaginationParams,
    ) -> ApiResult<Page<Unit>> {
        let (limit, offset) = limit_offset(params);
        let rows: Vec<UnitRow> = sqlx::query_as(&format!(
            "SELECT {COLUMNS} FROM units WHERE property_id = ? \
             ORDER BY created_at, id LIMIT ? OFFSET ?"
        ))
        .bind(property.to_raw())
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        let (total,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM units WHERE property_id = ?")
            .bind(property.to_raw())
            .fetch_one(&self.pool)
            .await?;

        Ok((to_units(rows)?, total as u64))
    }

    /// List units admitted by a public listing filter.
    ///
    /// The filter is translated to SQL; anything other than the public
    /// vacancy filter yields an empty page.
    pub async fn list_public(
        &self,
        filter: ListFilter,
        params: &PaginationParams,
    ) -> ApiResult<Page<Unit>> {
        if filter != ListFilter::PublicVacant {
            return Ok((Vec::new(), 0));
        }

        let (limit, offset) = limit_offset(params);
        let rows: Vec<UnitRow> = sqlx::query_as(&format!(
            "SELECT {COLUMNS} FROM units WHERE is_public = 1 AND is_occupied = 0 \
             ORDER BY created_at, id LIMIT ? OFFSET ?"
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        let (total,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM units WHERE is_public = 1 AND is_occupied = 0")
                .fetch_one(&self.pool)
                .await?;

        Ok((to_units(rows)?, total as u64))
    }

    pub async fn find(&self, id: UnitId) -> ApiResult<Option<Unit>> {
        let row: Option<UnitRow> = sqlx::query_as(&format!("SELECT {COLUMNS} FROM units WHERE id = ?"))
            .bind(id.to_raw())
            .fetch_optional(&self.pool)
            .await?;
        row.map(Unit::try_from).transpose()
    }

    pub async fn create(
        &self,
        property: PropertyId,
        by: UserId,
        req: &CreateUnitRequest,
    ) -> ApiResult<Unit> {
        let id = UnitId::new();
        let now = Utc::now();
        sqlx::query(
            "INSERT INTO units (id, property_id, name, floor, description, is_occupied, amenities, \
             bedrooms, bathrooms, parking_space, parking_slots, is_public, price, service_charge, \
             security_deposit, created_at, updated_at, created_by) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(id.to_raw())
        .bind(property.to_raw())
        .bind(&req.name)
        .bind(&req.floor)
        .bind(&req.description)
        .bind(req.is_occupied)
        .bind(&req.amenities)
        .bind(req.bedrooms)
        .bind(req.bathrooms)
        .bind(req.parking_space)
        .bind(req.parking_slots)
        .bind(req.is_public)
        .bind(req.price.map(|d| d.to_string()))
        .bind(req.service_charge.map(|d| d.to_string()))
        .bind(req.security_deposit.map(|d| d.to_string()))
        .bind(now)
        .bind(now)
        .bind(by.to_raw())
        .execute(&self.pool)
        .await?;

        self.find(id)
            .await?
            .ok_or_else(|| crate::error::not_found("unit", &id.to_raw()))
    }

    pub async fn update(
        &self,
        id: UnitId,
        by: UserId,
        req: &UpdateUnitRequest,
    ) -> ApiResult<Option<Unit>> {
        sqlx::query(
            "UPDATE units SET \
             name = COALESCE(?, name), \
             floor = COALESCE(?, floor), \
             description = COALESCE(?, description), \
             is_occupied = COALESCE(?, is_occupied), \
             amenities = COALESCE(?, amenities), \
             bedrooms = COALESCE(?, bedrooms), \
             bathrooms = COALESCE(?, bathrooms), \
             parking_space = COALESCE(?, parking_space), \
             parking_slots = COALESCE(?, parking_slots), \
             is_public = COALESCE(?, is_public), \
             price = COALESCE(?, price), \
             service_charge = COALESCE(?, service_charge), \
             security_deposit = COALESCE(?, security_deposit), \
             updated_at = ?, updated_by = ? \
             WHERE id = ?",
        )
        .bind(req.name.as_deref())
        .bind(req.floor.as_deref())
        .bind(req.description.as_deref())
        .bind(req.is_occupied)
        .bind(req.amenities.as_deref())
        .bind(req.bedrooms)
        .bind(req.bathrooms)
        .bind(req.parking_space)
        .bind(req.parking_slots)
        .bind(req.is_public)
        .bind(req.price.map(|d| d.to_string()))
        .bind(req.service_charge.map(|d| d.to_string()))
        .bind(req.security_deposit.map(|d| d.to_string()))
        .bind(Utc::now())
        .bind(by.to_raw())
        .bind(id.to_raw())
        .execute(&self.pool)
        .await?;

        self.find(id).await
    }

    pub async fn delete(&self, id: UnitId) -> ApiResult<bool> {
        let result = sqlx::query("DELETE FROM units WHERE id = ?")
            .bind(id.to_raw())
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

fn to_units(rows: Vec<UnitRow>) -> ApiResult<Vec<Unit>> {
    rows.into_iter().map(Unit::try_from).collect()
}
