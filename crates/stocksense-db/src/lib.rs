//! `SQLite` persistence for the `StockSense` watchlist.
//!
//! The database holds a single table of starred symbols. Analysis results
//! are never stored.

mod error;
mod pool;
mod schema;
pub mod watchlist;

pub use error::DbError;
pub use pool::{connect_pool, PoolConfig};
pub use schema::{health_check, ping, run_migrations};
pub use watchlist::{
    get_starred_stock, list_starred_stocks, remove_starred_stock, touch_starred_stock,
    upsert_starred_stock, StarredStockRow,
};
