//! Database migration utilities.

use anyhow::{Context, Result};
use sqlx::SqlitePool;
use tracing::info;

/// Run database migrations.
pub async fn run_migrations(pool: &SqlitePool) -> Result<()> {
    info!("Running database migrations...");

    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .context("Failed to run migrations")?;

    info!("Migrations completed");
    Ok(())
}

/// List migrations that have not been applied yet.
pub async fn check_migrations(pool: &SqlitePool) -> Result<Vec<String>> {
    use sqlx::migrate::Migrate;

    let migrator = sqlx::migrate!("./migrations");
    let mut conn = pool.acquire().await.context("Failed to acquire connection")?;
    conn.ensure_migrations_table()
        .await
        .context("Failed to prepare migrations table")?;
    let applied = conn
        .list_applied_migrations()
        .await
        .context("Failed to check applied migrations")?;

    let pending: Vec<String> = migrator
        .migrations
        .iter()
        .filter(|m| !applied.iter().any(|a| a.version == m.version))
        .map(|m| format!("{}_{}", m.version, m.description))
        .collect();

    Ok(pending)
}
