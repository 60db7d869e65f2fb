//! Transaction helper utilities.

use crate::error::ApiError;
use sqlx::{Sqlite, SqlitePool, Transaction};
use std::future::Future;

/// Execute a function within a transaction.
///
/// The closure hands the transaction back alongside its result; it is
/// committed only on success and rolled back when dropped on error.
pub async fn with_transaction<F, Fut, T>(pool: &SqlitePool, f: F) -> Result<T, ApiError>
where
    F: FnOnce(Transaction<'static, Sqlite>) -> Fut,
    Fut: Future<Output = Result<(Transaction<'static, Sqlite>, T), ApiError>>,
{
    let tx = pool.begin().await?;
    let (tx, result) = f(tx).await?;
    tx.commit().await?;
    Ok(result)
}
