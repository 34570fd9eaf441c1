use sqlx::migrate::Migrator;
use sqlx::SqlitePool;

use crate::DbError;

// Relative to this crate's Cargo.toml.
static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");

/// Versions already recorded by sqlx. A database that has never been
/// migrated has no bookkeeping table and reports none.
async fn applied_versions(pool: &SqlitePool) -> Vec<i64> {
    sqlx::query_scalar::<_, i64>("SELECT version FROM _sqlx_migrations WHERE success = 1")
        .fetch_all(pool)
        .await
        .unwrap_or_default()
}

/// Bring the watchlist schema up to date.
///
/// Returns how many migrations this call applied; zero when the schema was
/// already current.
///
/// # Errors
///
/// Returns [`DbError::Migration`] if any migration fails.
pub async fn run_migrations(pool: &SqlitePool) -> Result<usize, DbError> {
    let applied = applied_versions(pool).await;
    let pending = MIGRATOR
        .iter()
        .filter(|m| !m.migration_type.is_down_migration())
        .filter(|m| !applied.contains(&m.version))
        .count();

    MIGRATOR.run(pool).await?;
    if pending > 0 {
        tracing::info!(pending, "watchlist schema migrated");
    }
    Ok(pending)
}

/// Check that a connection can be acquired.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn ping(pool: &SqlitePool) -> Result<(), DbError> {
    sqlx::query_scalar::<_, i64>("SELECT 1")
        .fetch_one(pool)
        .await?;
    Ok(())
}

/// Check that the watchlist table is reachable, not just the connection.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the database is down or unmigrated.
pub async fn health_check(pool: &SqlitePool) -> Result<(), DbError> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM starred_stocks")
        .fetch_one(pool)
        .await?;
    Ok(())
}
