use chrono::Utc;
use stocksense_core::Symbol;

/// Print the watchlist, newest first.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub(crate) async fn run_watchlist_list(pool: &sqlx::SqlitePool) -> anyhow::Result<()> {
    let rows = stocksense_db::list_starred_stocks(pool).await?;

    if rows.is_empty() {
        println!("no starred stocks; run `watchlist add <SYMBOL>` first");
        return Ok(());
    }

    println!("{:<10}{:<18}LAST UPDATED", "SYMBOL", "ADDED");
    for row in &rows {
        println!(
            "{:<10}{:<18}{}",
            row.symbol,
            row.added_at.format("%Y-%m-%d %H:%M"),
            row.last_updated.format("%Y-%m-%d %H:%M")
        );
    }

    Ok(())
}

/// Star a symbol. Re-starring keeps the original `added_at`.
///
/// # Errors
///
/// Returns an error if the symbol is malformed or the upsert fails.
pub(crate) async fn run_watchlist_add(pool: &sqlx::SqlitePool, raw: &str) -> anyhow::Result<()> {
    let symbol = Symbol::parse(raw)?;
    stocksense_db::upsert_starred_stock(pool, symbol.as_str(), Utc::now()).await?;
    println!("{symbol} added to starred stocks");
    Ok(())
}

/// # Errors
///
/// Returns an error if the symbol is malformed or the delete fails.
pub(crate) async fn run_watchlist_remove(pool: &sqlx::SqlitePool, raw: &str) -> anyhow::Result<()> {
    let symbol = Symbol::parse(raw)?;
    if stocksense_db::remove_starred_stock(pool, symbol.as_str()).await? {
        println!("{symbol} removed from starred stocks");
    } else {
        println!("{symbol} was not starred");
    }
    Ok(())
}
