//! Shared application state.

use crate::config::ServerConfig;
use crate::db::{create_pool, run_migrations};
use crate::repository::{
    ImageRepository, LeaseRepository, PropertyRepository, RoleRepository, UnitRepository,
    UserRepository,
};
use sqlx::SqlitePool;
use std::sync::Arc;

/// State handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    pub pool: SqlitePool,
}

impl AppState {
    /// Connect to the configured database and apply migrations if enabled.
    pub async fn new(config: ServerConfig) -> anyhow::Result<Self> {
        let pool = create_pool(&config.database).await?;
        if config.database.run_migrations {
            run_migrations(&pool).await?;
        }
        Ok(Self::with_pool(config, pool))
    }

    /// Build state around an existing pool.
    pub fn with_pool(config: ServerConfig, pool: SqlitePool) -> Self {
        Self {
            config: Arc::new(config),
            pool,
        }
    }

    pub fn users(&self) -> UserRepository {
        UserRepository::new(self.pool.clone())
    }

    pub fn roles(&self) -> RoleRepository {
        RoleRepository::new(self.pool.clone())
    }

    pub fn properties(&self) -> PropertyRepository {
        PropertyRepository::new(self.pool.clone())
    }

    pub fn units(&self) -> UnitRepository {
        UnitRepository::new(self.pool.clone())
    }

    pub fn leases(&self) -> LeaseRepository {
        LeaseRepository::new(self.pool.clone())
    }

    pub fn images(&self) -> ImageRepository {
        ImageRepository::new(self.pool.clone())
    }
}
