use super::{limit_offset, Page};
use crate::error::ApiResult;
use crate::models::{Role, RoleRow};
use crate::request::UpdateRoleRequest;
use crate::response::PaginationParams;
use leasehold_common_core::RoleId;
use sqlx::SqlitePool;

#[derive(Clone)]
pub struct RoleRepository {
    pool: SqlitePool,
}

impl RoleRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list(&self, params: &PaginationParams) -> ApiResult<Page<Role>> {
        let (limit, offset) = limit_offset(params);
        let rows: Vec<RoleRow> =
            sqlx::query_as("SELECT id, name, description FROM roles ORDER BY name LIMIT ? OFFSET ?")
                .bind(limit)
                .bind(offset)
                .fetch_all(&self.pool)
                .await?;
        let (total,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM roles")
            .fetch_one(&self.pool)
            .await?;

        let roles = rows.into_iter().map(Role::try_from).collect::<ApiResult<_>>()?;
        Ok((roles, total as u64))
    }

    pub async fn find(&self, id: RoleId) -> ApiResult<Option<Role>> {
        let row: Option<RoleRow> =
            sqlx::query_as("SELECT id, name, description FROM roles WHERE id = ?")
                .bind(id.to_raw())
                .fetch_optional(&self.pool)
                .await?;
        row.map(Role::try_from).transpose()
    }

    pub async fn find_by_name(&self, name: &str) -> ApiResult<Option<Role>> {
        let row: Option<RoleRow> =
            sqlx::query_as("SELECT id, name, description FROM roles WHERE name = ?")
                .bind(name)
                .fetch_optional(&self.pool)
                .await?;
        row.map(Role::try_from).transpose()
    }

    pub async fn create(&self, name: &str, description: &str) -> ApiResult<Role> {
        let id = RoleId::new();
        sqlx::query("INSERT INTO roles (id, name, description) VALUES (?, ?, ?)")
            .bind(id.to_raw())
            .bind(name)
            .bind(description)
            .execute(&self.pool)
            .await?;

        Ok(Role {
            id,
            name: name.to_string(),
            description: description.to_string(),
        })
    }

    /// Apply a partial update. Returns `None` when the role does not exist.
    pub async fn update(&self, id: RoleId, req: &UpdateRoleRequest) -> ApiResult<Option<Role>> {
        sqlx::query(
            "UPDATE roles SET name = COALESCE(?, name), description = COALESCE(?, description) \
             WHERE id = ?",
        )
        .bind(req.name.as_deref())
        .bind(req.description.as_deref())
        .bind(id.to_raw())
        .execute(&self.pool)
        .await?;

        self.find(id).await
    }

    /// Delete a role. Users holding it are left without a role.
    pub async fn delete(&self, id: RoleId) -> ApiResult<bool> {
        let result = sqlx::query("DELETE FROM roles WHERE id = ?")
            .bind(id.to_raw())
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
