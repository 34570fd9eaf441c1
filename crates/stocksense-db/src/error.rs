use thiserror::Error;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("symbol is not on the watchlist")]
    NotFound,
    #[error("invalid database url: {0}")]
    InvalidUrl(String),
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
    #[error(transparent)]
    Migration(#[from] sqlx::migrate::MigrateError),
}
