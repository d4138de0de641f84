//! PostgreSQL access for the dex API.
//!
//! Queries are plain SQL strings run through `sqlx`; the interesting parts
//! live in [`decode`] (turning LEFT JOIN result sets into one parent plus
//! its children), [`fanout`] (running independent sub-queries
//! concurrently) and [`query`] (ordered, bounded list queries).

use std::time::Duration;

use sqlx::postgres::{PgConnectOptions, PgPoolOptions};

pub mod decode;
pub mod error;
pub mod fanout;
pub mod models;
pub mod query;
pub mod repositories;

pub use error::DbError;

pub type DbPool = sqlx::PgPool;

/// Connection settings, parsed from a URL or assembled from parts.
pub type DbConnectOptions = PgConnectOptions;

/// Create a connection pool.
pub async fn create_pool(
    options: DbConnectOptions,
    max_connections: u32,
) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(Duration::from_secs(5))
        .connect_with(options)
        .await
}

/// Round-trip a trivial query to confirm the pool can reach the database.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query_scalar::<_, i32>("SELECT 1")
        .fetch_one(pool)
        .await
        .map(|_| ())
}

/// Apply the schema in `migrations/`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../migrations").run(pool).await
}
