//! Migration bookkeeping and health checks against fresh `SQLite` databases.

use sqlx::SqlitePool;
use stocksense_db::{health_check, ping, run_migrations, DbError};

#[sqlx::test(migrations = false)]
async fn first_run_applies_every_migration_then_nothing(pool: SqlitePool) {
    assert_eq!(run_migrations(&pool).await.unwrap(), 1);
    assert_eq!(run_migrations(&pool).await.unwrap(), 0);
    health_check(&pool).await.unwrap();
}

#[sqlx::test(migrations = false)]
async fn health_check_fails_before_migrations(pool: SqlitePool) {
    ping(&pool).await.unwrap();

    let result = health_check(&pool).await;
    assert!(matches!(result, Err(DbError::Sqlx(_))), "got: {result:?}");
}
