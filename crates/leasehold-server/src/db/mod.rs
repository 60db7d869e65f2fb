//! Database connection management and utilities.
//!
//! - Connection pool configuration and management
//! - Health monitoring
//! - Transaction helpers
//! - Embedded migrations

pub mod health;
pub mod migration;
pub mod pool;
pub mod transaction;

pub use health::{check_health, DbHealth};
pub use migration::{check_migrations, run_migrations};
pub use pool::{create_pool, pool_stats, verify_connection, PoolStats};
pub use transaction::with_transaction;
