use std::sync::Arc;

use dinner_poll_core::reset::ResetSettings;
use dinner_poll_core::vote::ValidVote;

use crate::error::StoreError;
use crate::models::vote::RoundResult;
use crate::repositories::VoteRepo;
use crate::schema::{SchemaGuard, SchemaStatus};
use crate::DbPool;

/// Vote writer and result aggregator over one pool.
///
/// Cheaply cloneable; clones share the same [`SchemaGuard`], so the schema is
/// initialized once no matter how many handlers hold a copy.
#[derive(Clone)]
pub struct VoteStore {
    pool: DbPool,
    schema: Arc<SchemaGuard>,
}

impl VoteStore {
    pub fn new(pool: DbPool, settings: ResetSettings) -> Self {
        let schema = Arc::new(SchemaGuard::new(pool.clone(), settings));
        Self { pool, schema }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        self.schema.ensure().await
    }

    pub async fn schema_status(&self) -> SchemaStatus {
        self.schema.status().await
    }

    pub fn schema(&self) -> &SchemaGuard {
        &self.schema
    }

    /// Record a voter's score for a restaurant in a round, replacing any
    /// previous score for the same triple.
    pub async fn submit_vote(&self, vote: &ValidVote) -> Result<(), StoreError> {
        self.ensure_schema().await?;
        VoteRepo::upsert(&self.pool, vote).await?;
        tracing::debug!(
            round_id = vote.round_id(),
            restaurant_id = vote.restaurant_id(),
            score = vote.score().value(),
            "Vote recorded",
        );
        Ok(())
    }

    /// Totals for every restaurant that received a vote in `round_id`.
    pub async fn round_results(&self, round_id: &str) -> Result<Vec<RoundResult>, StoreError> {
        self.ensure_schema().await?;
        Ok(VoteRepo::round_results(&self.pool, round_id).await?)
    }
}
