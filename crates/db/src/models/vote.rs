use dinner_poll_core::roster::RestaurantTally;
use dinner_poll_core::types::Timestamp;
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `votes` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Vote {
    pub id: i64,
    pub round_id: String,
    pub restaurant_id: String,
    pub user_id: String,
    pub score: i16,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Aggregate totals for one restaurant within a round.
///
/// Serialized as-is in the `GET /api/results/{roundId}` response.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct RoundResult {
    pub restaurant_id: String,
    pub total_score: i64,
    pub votes_count: i64,
}

impl RestaurantTally for RoundResult {
    fn restaurant_id(&self) -> &str {
        &self.restaurant_id
    }

    fn total_score(&self) -> i64 {
        self.total_score
    }

    fn votes_count(&self) -> i64 {
        self.votes_count
    }
}
