//! Handler for vote submission.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use dinner_poll_core::vote::{ensure_open, VoteSubmission};

use crate::error::AppResult;
use crate::response::OkResponse;
use crate::state::AppState;

/// POST /api/vote
///
/// Validate the submission, then upsert it. Invalid payloads are rejected
/// with 400 before the store is touched; votes after the closing time get 409.
pub async fn submit_vote(
    State(state): State<AppState>,
    payload: Result<Json<VoteSubmission>, JsonRejection>,
) -> AppResult<Json<OkResponse>> {
    let Json(submission) = payload?;
    let vote = submission.into_valid()?;

    ensure_open(state.poll.closes_at, chrono::Utc::now())?;

    state.store.submit_vote(&vote).await?;

    Ok(Json(OkResponse::ok()))
}
