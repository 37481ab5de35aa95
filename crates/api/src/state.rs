use std::sync::Arc;

use dinner_poll_db::VoteStore;

use crate::config::{PollConfig, ServerConfig};

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Vote writer and aggregator (owns the pool and the schema guard).
    pub store: VoteStore,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Roster and closing time of the running poll.
    pub poll: Arc<PollConfig>,
}
