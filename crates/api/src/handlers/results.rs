//! Handlers for round results.

use axum::extract::{Path, State};
use axum::Json;
use dinner_poll_core::roster::{merge_with_roster, RankedEntry};
use dinner_poll_db::models::vote::RoundResult;

use crate::error::{AppError, AppResult};
use crate::response::{DataResponse, ResultsResponse};
use crate::state::AppState;

/// GET /api/results/{round_id}
///
/// Raw aggregator output: restaurants with at least one vote, highest total
/// first. A round without votes returns an empty list.
pub async fn round_results(
    State(state): State<AppState>,
    Path(round_id): Path<String>,
) -> AppResult<Json<ResultsResponse<Vec<RoundResult>>>> {
    let round_id = require_round_id(&round_id)?;
    let results = state.store.round_results(round_id).await?;

    Ok(Json(ResultsResponse { results }))
}

/// GET /api/results
///
/// The round segment is required.
pub async fn missing_round_id() -> AppError {
    AppError::BadRequest("Missing roundId".into())
}

/// GET /api/rounds/{round_id}/ranking
///
/// Every roster restaurant with its totals, zero-filled and sorted by score.
pub async fn round_ranking(
    State(state): State<AppState>,
    Path(round_id): Path<String>,
) -> AppResult<Json<DataResponse<Vec<RankedEntry>>>> {
    let round_id = require_round_id(&round_id)?;
    let results = state.store.round_results(round_id).await?;
    let ranking = merge_with_roster(&state.poll.roster, &results);

    Ok(Json(DataResponse { data: ranking }))
}

/// Only an absent segment is rejected; the id is otherwise used as given,
/// the same way `POST /api/vote` stores it.
fn require_round_id(round_id: &str) -> AppResult<&str> {
    if round_id.is_empty() {
        return Err(AppError::BadRequest("Missing roundId".into()));
    }
    Ok(round_id)
}
