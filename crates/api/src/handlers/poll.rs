//! Handler for poll metadata.

use axum::extract::State;
use axum::Json;
use dinner_poll_core::roster::Candidate;
use dinner_poll_core::types::Timestamp;
use serde::Serialize;

use crate::response::DataResponse;
use crate::state::AppState;

/// Roster and closing state of the running poll.
#[derive(Debug, Serialize)]
pub struct PollInfo {
    pub restaurants: Vec<Candidate>,
    pub closes_at: Option<Timestamp>,
    pub is_closed: bool,
}

/// GET /api/poll
pub async fn poll_info(State(state): State<AppState>) -> Json<DataResponse<PollInfo>> {
    let closes_at = state.poll.closes_at;
    let is_closed = closes_at.is_some_and(|at| chrono::Utc::now() > at);

    Json(DataResponse {
        data: PollInfo {
            restaurants: state.poll.roster.clone(),
            closes_at,
            is_closed,
        },
    })
}
