//! Database operations for the `starred_stocks` watchlist table.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::SqlitePool;

use crate::DbError;

// ---------------------------------------------------------------------------
// Row type
// ---------------------------------------------------------------------------

/// A row from the `starred_stocks` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct StarredStockRow {
    pub symbol: String,
    pub added_at: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

/// List every starred symbol, newest first.
///
/// Ties on `added_at` are broken by symbol so the order is stable.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_starred_stocks(pool: &SqlitePool) -> Result<Vec<StarredStockRow>, DbError> {
    let rows = sqlx::query_as::<_, StarredStockRow>(
        "SELECT symbol, added_at, last_updated \
         FROM starred_stocks \
         ORDER BY added_at DESC, symbol ASC",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Fetch one starred symbol.
///
/// # Errors
///
/// Returns [`DbError::NotFound`] if the symbol is not starred, or
/// [`DbError::Sqlx`] if the query fails.
pub async fn get_starred_stock(pool: &SqlitePool, symbol: &str) -> Result<StarredStockRow, DbError> {
    sqlx::query_as::<_, StarredStockRow>(
        "SELECT symbol, added_at, last_updated FROM starred_stocks WHERE symbol = ?1",
    )
    .bind(symbol)
    .fetch_optional(pool)
    .await?
    .ok_or(DbError::NotFound)
}

/// Star a symbol, or refresh `last_updated` if it is already starred.
///
/// The original `added_at` survives a re-star.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the upsert fails.
pub async fn upsert_starred_stock(
    pool: &SqlitePool,
    symbol: &str,
    at: DateTime<Utc>,
) -> Result<StarredStockRow, DbError> {
    let row = sqlx::query_as::<_, StarredStockRow>(
        "INSERT INTO starred_stocks (symbol, added_at, last_updated) \
         VALUES (?1, ?2, ?2) \
         ON CONFLICT (symbol) DO UPDATE SET last_updated = excluded.last_updated \
         RETURNING symbol, added_at, last_updated",
    )
    .bind(symbol)
    .bind(at)
    .fetch_one(pool)
    .await?;

    Ok(row)
}

/// Remove a symbol from the watchlist.
///
/// Returns `true` when a row was deleted. Removing an unknown symbol is not an error.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the delete fails.
pub async fn remove_starred_stock(pool: &SqlitePool, symbol: &str) -> Result<bool, DbError> {
    let result = sqlx::query("DELETE FROM starred_stocks WHERE symbol = ?1")
        .bind(symbol)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Refresh `last_updated` for a starred symbol.
///
/// Returns `false` when the symbol is not starred.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the update fails.
pub async fn touch_starred_stock(
    pool: &SqlitePool,
    symbol: &str,
    at: DateTime<Utc>,
) -> Result<bool, DbError> {
    let result = sqlx::query("UPDATE starred_stocks SET last_updated = ?1 WHERE symbol = ?2")
        .bind(at)
        .bind(symbol)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
