use crate::error::ApiResult;
use crate::models::{User, UserRow};
use chrono::Utc;
use leasehold_common_core::{RoleId, UserId};
use sqlx::SqlitePool;

const SELECT_USER: &str = "SELECT u.id, u.username, u.email, u.first_name, u.last_name, u.phone, \
     u.role_id, r.name AS role_name, u.is_staff, u.date_joined \
     FROM users u LEFT JOIN roles r ON r.id = u.role_id";

/// User record as provisioned by the identity service.
#[derive(Debug, Clone, Default)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub role_id: Option<RoleId>,
    pub is_staff: bool,
}

#[derive(Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn find(&self, id: UserId) -> ApiResult<Option<User>> {
        let row: Option<UserRow> = sqlx::query_as(&format!("{SELECT_USER} WHERE u.id = ?"))
            .bind(id.to_raw())
            .fetch_optional(&self.pool)
            .await?;
        row.map(User::try_from).transpose()
    }

    pub async fn exists(&self, id: UserId) -> ApiResult<bool> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users WHERE id = ?")
            .bind(id.to_raw())
            .fetch_one(&self.pool)
            .await?;
        Ok(count > 0)
    }

    /// Insert a user. Only the identity service and tests create users.
    pub async fn create(&self, new: &NewUser) -> ApiResult<User> {
        let id = UserId::new();
        sqlx::query(
            "INSERT INTO users (id, username, email, first_name, last_name, phone, role_id, is_staff, date_joined) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(id.to_raw())
        .bind(&new.username)
        .bind(&new.email)
        .bind(&new.first_name)
        .bind(&new.last_name)
        .bind(&new.phone)
        .bind(new.role_id.map(|r| r.to_raw()))
        .bind(new.is_staff)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        self.find(id)
            .await?
            .ok_or_else(|| crate::error::not_found("user", &id.to_raw()))
    }
}
