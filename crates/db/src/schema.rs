//! Schema lifecycle for the vote store.
//!
//! The tables are created lazily on first use rather than by a migration
//! step, so a freshly provisioned database works without setup. The
//! [`SchemaGuard`] makes that initialization run once per process: concurrent
//! first callers await the same in-flight attempt, and a failed attempt
//! leaves the guard in [`SchemaStatus::Failed`] so the next caller retries.
//!
//! The configured [`ResetSettings`] are applied in the same transaction.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use dinner_poll_core::reset::{ResetAction, ResetSettings};
use futures::future::{BoxFuture, FutureExt, Shared};
use tokio::sync::Mutex;

use crate::error::StoreError;
use crate::repositories::{MetaRepo, VoteRepo};
use crate::DbPool;

/// Key for the transaction-scoped advisory lock that serializes schema
/// initialization across processes sharing one database.
const SCHEMA_LOCK_KEY: i64 = 0x766f_7465_735f_7631;

const CREATE_VOTES: &str = "\
    CREATE TABLE IF NOT EXISTS votes (
        id            BIGSERIAL PRIMARY KEY,
        round_id      TEXT NOT NULL,
        restaurant_id TEXT NOT NULL,
        user_id       TEXT NOT NULL,
        score         SMALLINT NOT NULL CHECK (score BETWEEN 0 AND 2),
        created_at    TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        updated_at    TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        CONSTRAINT uq_votes_round_restaurant_user UNIQUE (round_id, restaurant_id, user_id)
    )";

const CREATE_APP_META: &str = "\
    CREATE TABLE IF NOT EXISTS app_meta (
        id             SMALLINT PRIMARY KEY CHECK (id = 1),
        last_deploy_id TEXT NOT NULL,
        updated_at     TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )";

type InitResult = Result<ResetAction, Arc<sqlx::Error>>;

/// Externally visible initialization state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaStatus {
    Uninitialized,
    InProgress,
    Ready,
    Failed,
}

enum InitState {
    Uninitialized,
    InProgress {
        attempt: u64,
        init: Shared<BoxFuture<'static, InitResult>>,
    },
    Ready,
    Failed,
}

/// Run-once schema initialization shared by every caller of a store.
pub struct SchemaGuard {
    pool: DbPool,
    settings: ResetSettings,
    state: Mutex<InitState>,
    attempts: AtomicU64,
}

impl SchemaGuard {
    pub fn new(pool: DbPool, settings: ResetSettings) -> Self {
        Self {
            pool,
            settings,
            state: Mutex::new(InitState::Uninitialized),
            attempts: AtomicU64::new(0),
        }
    }

    /// Make sure the schema exists, initializing it if needed.
    ///
    /// Returns immediately once the guard is `Ready`. Otherwise joins the
    /// in-flight attempt, or starts one when there is none.
    pub async fn ensure(&self) -> Result<(), StoreError> {
        let (attempt, init) = {
            let mut state = self.state.lock().await;
            let in_flight = match &*state {
                InitState::Ready => return Ok(()),
                InitState::InProgress { attempt, init } => Some((*attempt, init.clone())),
                InitState::Uninitialized | InitState::Failed => None,
            };
            match in_flight {
                Some(joined) => joined,
                None => {
                    let attempt = self.attempts.fetch_add(1, Ordering::SeqCst) + 1;
                    let pool = self.pool.clone();
                    let settings = self.settings.clone();
                    let init = async move {
                        initialize(&pool, &settings).await.map_err(Arc::new)
                    }
                    .boxed()
                    .shared();
                    *state = InitState::InProgress {
                        attempt,
                        init: init.clone(),
                    };
                    (attempt, init)
                }
            }
        };

        let result = init.await;

        let mut state = self.state.lock().await;
        // Only the attempt we awaited may settle the state; a newer retry
        // could already be running.
        if matches!(&*state, InitState::InProgress { attempt: current, .. } if *current == attempt)
        {
            *state = match &result {
                Ok(_) => InitState::Ready,
                Err(err) => {
                    tracing::error!(attempt, error = %err, "Schema initialization failed");
                    InitState::Failed
                }
            };
        }

        result.map(|_| ()).map_err(StoreError::Schema)
    }

    pub async fn status(&self) -> SchemaStatus {
        match &*self.state.lock().await {
            InitState::Uninitialized => SchemaStatus::Uninitialized,
            InitState::InProgress { .. } => SchemaStatus::InProgress,
            InitState::Ready => SchemaStatus::Ready,
            InitState::Failed => SchemaStatus::Failed,
        }
    }

    /// Number of initialization attempts started by this guard.
    pub fn attempts(&self) -> u64 {
        self.attempts.load(Ordering::SeqCst)
    }
}

/// Create the tables and apply the reset policy in one transaction.
async fn initialize(pool: &DbPool, settings: &ResetSettings) -> Result<ResetAction, sqlx::Error> {
    let mut tx = pool.begin().await?;

    sqlx::query("SELECT pg_advisory_xact_lock($1)")
        .bind(SCHEMA_LOCK_KEY)
        .execute(&mut *tx)
        .await?;

    sqlx::query(CREATE_VOTES).execute(&mut *tx).await?;

    let stored_deploy_id = if settings.tracks_deploys() {
        sqlx::query(CREATE_APP_META).execute(&mut *tx).await?;
        MetaRepo::last_deploy_id(&mut tx).await?
    } else {
        None
    };

    let action = settings.action(stored_deploy_id.as_deref());
    if action == ResetAction::Truncate {
        VoteRepo::truncate(&mut tx).await?;
        tracing::warn!(
            policy = %settings.policy,
            previous_deploy = ?stored_deploy_id,
            current_deploy = ?settings.current_deploy_id(),
            "Votes table truncated by reset policy",
        );
    }

    if settings.tracks_deploys() && action == ResetAction::Truncate {
        if let Some(deploy_id) = settings.current_deploy_id() {
            MetaRepo::record_deploy(&mut tx, deploy_id).await?;
        }
    }

    tx.commit().await?;

    tracing::info!(policy = %settings.policy, ?action, "Vote schema ready");
    Ok(action)
}
