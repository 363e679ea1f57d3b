use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

/// Creates an in-memory SQLite pool with the storefront schema applied
pub async fn create_test_pool() -> SqlitePool {
    let options = sf_db::with_email_collation(SqliteConnectOptions::new())
        .filename(":memory:")
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1) // In-memory needs single connection
        .connect_with(options)
        .await
        .expect("Failed to create test pool");

    sf_db::run_migrations(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}
