use crate::db::with_transaction;
use crate::error::ApiResult;
use crate::models::{Lease, LeaseRow};
use crate::request::{check_lease_dates, CreateLeaseRequest, UpdateLeaseRequest};
use chrono::{NaiveDate, Utc};
use leasehold_common_core::{LeaseId, UnitId};
use sqlx::SqlitePool;

const COLUMNS: &str =
    "id, unit_id, tenant_id, start_date, end_date, rent_amount, is_active, created_at, updated_at";

#[derive(Clone)]
pub struct LeaseRepository {
    pool: SqlitePool,
}

impl LeaseRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn find(&self, id: LeaseId) -> ApiResult<Option<Lease>> {
        let row: Option<LeaseRow> = sqlx::query_as(&format!("SELECT {COLUMNS} FROM leases WHERE id = ?"))
            .bind(id.to_raw())
            .fetch_optional(&self.pool)
            .await?;
        row.map(Lease::try_from).transpose()
    }

    pub async fn find_by_unit(&self, unit: UnitId) -> ApiResult<Option<Lease>> {
        let row: Option<LeaseRow> =
            sqlx::query_as(&format!("SELECT {COLUMNS} FROM leases WHERE unit_id = ?"))
                .bind(unit.to_raw())
                .fetch_optional(&self.pool)
                .await?;
        row.map(Lease::try_from).transpose()
    }

    /// Insert a lease and mark its unit occupied, atomically.
    ///
    /// A unit holds at most one lease; a second insert fails with a
    /// duplicate-entry error and leaves the unit untouched.
    pub async fn create(&self, unit: UnitId, req: &CreateLeaseRequest) -> ApiResult<Lease> {
        let id = LeaseId::new();
        let now = Utc::now();
        let rent_amount = req.rent_amount.to_string();

        with_transaction(&self.pool, |mut tx| async move {
            sqlx::query(
                "INSERT INTO leases (id, unit_id, tenant_id, start_date, end_date, rent_amount, \
                 is_active, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
            )
            .bind(id.to_raw())
            .bind(unit.to_raw())
            .bind(req.tenant_id.to_raw())
            .bind(req.start_date)
            .bind(req.end_date)
            .bind(&rent_amount)
            .bind(req.is_active)
            .bind(now)
            .bind(now)
            .execute(&mut *tx)
            .await?;

            sqlx::query("UPDATE units SET is_occupied = 1, updated_at = ? WHERE id = ?")
                .bind(now)
                .bind(unit.to_raw())
                .execute(&mut *tx)
                .await?;

            Ok((tx, ()))
        })
        .await?;

        self.find(id)
            .await?
            .ok_or_else(|| crate::error::not_found("lease", &id.to_raw()))
    }

    /// Apply a partial update.
    ///
    /// The date order is re-checked against the stored row, since the body
    /// may carry only one of the two dates.
    pub async fn update(&self, id: LeaseId, req: &UpdateLeaseRequest) -> ApiResult<Option<Lease>> {
        let updated = with_transaction(&self.pool, |mut tx| async move {
            let current: Option<(NaiveDate, Option<NaiveDate>)> =
                sqlx::query_as("SELECT start_date, end_date FROM leases WHERE id = ?")
                    .bind(id.to_raw())
                    .fetch_optional(&mut *tx)
                    .await?;
            let Some((start_date, end_date)) = current else {
                return Ok((tx, false));
            };
            check_lease_dates(req.start_date.unwrap_or(start_date), req.end_date.or(end_date))?;

            sqlx::query(
                "UPDATE leases SET \
                 start_date = COALESCE(?, start_date), \
                 end_date = COALESCE(?, end_date), \
                 rent_amount = COALESCE(?, rent_amount), \
                 is_active = COALESCE(?, is_active), \
                 updated_at = ? \
                 WHERE id = ?",
            )
            .bind(req.start_date)
            .bind(req.end_date)
            .bind(req.rent_amount.map(|d| d.to_string()))
            .bind(req.is_active)
            .bind(Utc::now())
            .bind(id.to_raw())
            .execute(&mut *tx)
            .await?;

            Ok((tx, true))
        })
        .await?;

        if !updated {
            return Ok(None);
        }
        self.find(id).await
    }

    /// Delete a lease and mark its unit vacant again, atomically.
    pub async fn delete(&self, id: LeaseId) -> ApiResult<bool> {
        with_transaction(&self.pool, |mut tx| async move {
            let unit: Option<(String,)> = sqlx::query_as("SELECT unit_id FROM leases WHERE id = ?")
                .bind(id.to_raw())
                .fetch_optional(&mut *tx)
                .await?;
            let Some((unit,)) = unit else {
                return Ok((tx, false));
            };

            sqlx::query("DELETE FROM leases WHERE id = ?")
                .bind(id.to_raw())
                .execute(&mut *tx)
                .await?;
            sqlx::query("UPDATE units SET is_occupied = 0, updated_at = ? WHERE id = ?")
                .bind(Utc::now())
                .bind(unit)
                .execute(&mut *tx)
                .await?;

            Ok((tx, true))
        })
        .await
    }
}
