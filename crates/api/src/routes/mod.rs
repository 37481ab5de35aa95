pub mod health;

use axum::routing::{get, post};
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api` route tree.
///
/// ```text
/// POST /vote                              submit or overwrite a vote
/// GET  /results                           400 (round id required)
/// GET  /results/{round_id}                aggregated totals, voted restaurants only
/// GET  /rounds/{round_id}/ranking         full roster, zero-filled
/// GET  /poll                              roster and closing time
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/vote", post(handlers::vote::submit_vote))
        .route("/results", get(handlers::results::missing_round_id))
        .route("/results/", get(handlers::results::missing_round_id))
        .route("/results/{round_id}", get(handlers::results::round_results))
        .route(
            "/rounds/{round_id}/ranking",
            get(handlers::results::round_ranking),
        )
        .route("/poll", get(handlers::poll::poll_info))
}
