//! Repository for the `votes` table.

use dinner_poll_core::vote::ValidVote;
use sqlx::PgPool;

use crate::models::vote::{RoundResult, Vote};

/// Column list for `votes` SELECT queries.
const COLUMNS: &str = "id, round_id, restaurant_id, user_id, score, created_at, updated_at";

/// Provides the write and aggregation queries for votes.
pub struct VoteRepo;

impl VoteRepo {
    /// Insert a vote, or overwrite the score of the existing row for the same
    /// (round, restaurant, voter).
    ///
    /// The insert-or-update decision is made by the unique constraint in a
    /// single statement, so concurrent submissions for the same key cannot
    /// both insert.
    pub async fn upsert(pool: &PgPool, vote: &ValidVote) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO votes (round_id, restaurant_id, user_id, score) \
             VALUES ($1, $2, $3, $4) \
             ON CONFLICT (round_id, restaurant_id, user_id) \
             DO UPDATE SET score = EXCLUDED.score, updated_at = NOW()",
        )
        .bind(vote.round_id())
        .bind(vote.restaurant_id())
        .bind(vote.user_id())
        .bind(vote.score().value())
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Per-restaurant totals for a round, highest total first.
    ///
    /// Only restaurants with at least one vote are returned. Ties are ordered
    /// by `restaurant_id`.
    pub async fn round_results(
        pool: &PgPool,
        round_id: &str,
    ) -> Result<Vec<RoundResult>, sqlx::Error> {
        sqlx::query_as::<_, RoundResult>(
            "SELECT restaurant_id, \
                    SUM(score)::BIGINT AS total_score, \
                    COUNT(*)::BIGINT AS votes_count \
             FROM votes \
             WHERE round_id = $1 \
             GROUP BY restaurant_id \
             ORDER BY total_score DESC, restaurant_id ASC",
        )
        .bind(round_id)
        .fetch_all(pool)
        .await
    }

    /// Look up the row for one (round, restaurant, voter) triple.
    pub async fn find(
        pool: &PgPool,
        round_id: &str,
        restaurant_id: &str,
        user_id: &str,
    ) -> Result<Option<Vote>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM votes \
             WHERE round_id = $1 AND restaurant_id = $2 AND user_id = $3"
        );
        sqlx::query_as::<_, Vote>(&query)
            .bind(round_id)
            .bind(restaurant_id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Total number of vote rows across all rounds.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM votes")
            .fetch_one(pool)
            .await?;
        Ok(count)
    }

    /// Remove every vote. Runs inside the schema initialization transaction.
    pub(crate) async fn truncate(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("TRUNCATE TABLE votes")
            .execute(&mut **tx)
            .await?;
        Ok(())
    }
}
