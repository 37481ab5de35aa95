//! PostgreSQL storage for the dinner poll.
//!
//! [`VoteStore`] is the entry point used by the API: it owns the pool and the
//! [`SchemaGuard`] and runs every query through the repositories.

use sqlx::postgres::PgPoolOptions;

pub mod error;
pub mod models;
pub mod repositories;
pub mod schema;
pub mod store;

pub use error::StoreError;
pub use schema::{SchemaGuard, SchemaStatus};
pub use store::VoteStore;

pub type DbPool = sqlx::PgPool;

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
}

/// Round-trip a trivial query to confirm the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}
