//! Database Module
//!
//! PostgreSQL connection pool construction.
//!
//! Callers that need strict snapshot isolation across the batched lookups
//! of one resolution should run the stores inside a single
//! `REPEATABLE READ` transaction; the pool itself gives per-query
//! consistency only.

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::time::Duration;

use crate::config::DatabaseSettings;

/// Create a PostgreSQL connection pool
pub async fn create_pool(settings: &DatabaseSettings) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .min_connections(settings.min_connections)
        .acquire_timeout(Duration::from_secs(settings.acquire_timeout))
        .connect(&settings.url)
        .await
}
