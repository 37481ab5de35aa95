use dinner_poll_core::types::Timestamp;
use serde::Serialize;
use sqlx::FromRow;

/// The single `app_meta` row used by the per-deploy reset policy.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AppMeta {
    pub last_deploy_id: String,
    pub updated_at: Timestamp,
}
