use std::sync::Arc;

/// Errors surfaced by [`crate::VoteStore`].
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The shared schema initialization attempt failed. The guard is reset,
    /// so the next call starts a new attempt.
    #[error("Schema initialization failed: {0}")]
    Schema(#[source] Arc<sqlx::Error>),

    /// A query against an initialized schema failed.
    #[error("Query failed: {0}")]
    Query(#[from] sqlx::Error),
}
