use super::{limit_offset, Page};
use crate::error::ApiResult;
use crate::models::{Property, PropertyRow};
use crate::request::{CreatePropertyRequest, UpdatePropertyRequest};
use crate::response::PaginationParams;
use chrono::Utc;
use leasehold_common_core::{PropertyId, UserId};
use sqlx::SqlitePool;

const COLUMNS: &str = "id, owner_id, name, description, longitude, latitude, property_type, \
     created_at, updated_at, deleted_at, created_by, updated_by, deleted_by";

#[derive(Clone)]
pub struct PropertyRepository {
    pool: SqlitePool,
}

impl PropertyRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// List properties, restricted to one owner when `owner` is set.
    pub async fn list(
        &self,
        owner: Option<UserId>,
        params: &PaginationParams,
    ) -> ApiResult<Page<Property>> {
        let (limit, offset) = limit_offset(params);
        let owner = owner.map(|o| o.to_raw());

        let rows: Vec<PropertyRow> = sqlx::query_as(&format!(
            "SELECT {COLUMNS} FROM properties WHERE (?1 IS NULL OR owner_id = ?1) \
             ORDER BY created_at, id LIMIT ?2 OFFSET ?3"
        ))
        .bind(owner.as_deref())
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        let (total,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM properties WHERE (?1 IS NULL OR owner_id = ?1)")
                .bind(owner.as_deref())
                .fetch_one(&self.pool)
                .await?;

        let properties = rows
            .into_iter()
            .map(Property::try_from)
            .collect::<ApiResult<_>>()?;
        Ok((properties, total as u64))
    }

    pub async fn find(&self, id: PropertyId) -> ApiResult<Option<Property>> {
        let row: Option<PropertyRow> =
            sqlx::query_as(&format!("SELECT {COLUMNS} FROM properties WHERE id = ?"))
                .bind(id.to_raw())
                .fetch_optional(&self.pool)
                .await?;
        row.map(Property::try_from).transpose()
    }

    /// Insert a property owned and created by `owner`.
    pub async fn create(&self, owner: UserId, req: &CreatePropertyRequest) -> ApiResult<Property> {
        let id = PropertyId::new();
        let now = Utc::now();
        sqlx::query(
            "INSERT INTO properties (id, owner_id, name, description, longitude, latitude, \
             property_type, created_at, updated_at, created_by) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(id.to_raw())
        .bind(owner.to_raw())
        .bind(&req.name)
        .bind(&req.description)
        .bind(req.longitude)
        .bind(req.latitude)
        .bind(req.property_type.as_str())
        .bind(now)
        .bind(now)
        .bind(owner.to_raw())
        .execute(&self.pool)
        .await?;

        self.find(id)
            .await?
            .ok_or_else(|| crate::error::not_found("property", &id.to_raw()))
    }

    /// Apply a partial update, recording `by` as the last editor.
    pub async fn update(
        &self,
        id: PropertyId,
        by: UserId,
        req: &UpdatePropertyRequest,
    ) -> ApiResult<Option<Property>> {
        sqlx::query(
            "UPDATE properties SET \
             name = COALESCE(?, name), \
             description = COALESCE(?, description), \
             longitude = COALESCE(?, longitude), \
             latitude = COALESCE(?, latitude), \
             property_type = COALESCE(?, property_type), \
             updated_at = ?, updated_by = ? \
             WHERE id = ?",
        )
        .bind(req.name.as_deref())
        .bind(req.description.as_deref())
        .bind(req.longitude)
        .bind(req.latitude)
        .bind(req.property_type.map(|t| t.as_str()))
        .bind(Utc::now())
        .bind(by.to_raw())
        .bind(id.to_raw())
        .execute(&self.pool)
        .await?;

        self.find(id).await
    }

    /// Hard delete. Units, leases and images go with it.
    pub async fn delete(&self, id: PropertyId) -> ApiResult<bool> {
        let result = sqlx::query("DELETE FROM properties WHERE id = ?")
            .bind(id.to_raw())
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PropertyType;
    use crate::repository::test_support;

    fn villa() -> CreatePropertyRequest {
        CreatePropertyRequest {
            name: "Villa".into(),
            description: String::new(),
            longitude: Some(36.8),
            latitude: Some(-1.28),
            property_type: PropertyType::House,
        }
    }

    #[tokio::test]
    async fn test_create_records_owner_and_creator() {
        let pool = test_support::pool().await;
        let owner = test_support::user(&pool, "lara", Some("landlord")).await;

        let property = PropertyRepository::new(pool).create(owner, &villa()).await.unwrap();
        assert_eq!(property.owner_id, owner);
        assert_eq!(property.created_by, owner);
        assert!(property.updated_by.is_none());
        assert_eq!(property.property_type, PropertyType::House);
    }

    #[tokio::test]
    async fn test_list_filters_by_owner() {
        let pool = test_support::pool().await;
        let alice = test_support::user(&pool, "alice", Some("landlord")).await;
        let bob = test_support::user(&pool, "bob", Some("landlord")).await;
        let repo = PropertyRepository::new(pool);
        repo.create(alice, &villa()).await.unwrap();
        repo.create(alice, &villa()).await.unwrap();
        repo.create(bob, &villa()).await.unwrap();

        let params = PaginationParams::default();
        let (mine, total) = repo.list(Some(alice), &params).await.unwrap();
        assert_eq!(total, 2);
        assert!(mine.iter().all(|p| p.owner_id == alice));

        let (_, all) = repo.list(None, &params).await.unwrap();
        assert_eq!(all, 3);
    }

    #[tokio::test]
    async fn test_partial_update_keeps_other_fields() {
        let pool = test_support::pool().await;
        let owner = test_support::user(&pool, "lara", Some("landlord")).await;
        let repo = PropertyRepository::new(pool);
        let property = repo.create(owner, &villa()).await.unwrap();

        let updated = repo
            .update(
                property.id,
                owner,
                &UpdatePropertyRequest {
                    property_type: Some(PropertyType::Cottage),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.name, "Villa");
        assert_eq!(updated.latitude, Some(-1.28));
        assert_eq!(updated.property_type, PropertyType::Cottage);
        assert_eq!(updated.updated_by, Some(owner));
    }
}
