//! Repository for the single-row `app_meta` table.

use sqlx::PgPool;

use crate::models::meta::AppMeta;

/// Reads and records the last deployment identifier seen by the store.
pub struct MetaRepo;

impl MetaRepo {
    /// Fetch the metadata row, if one has been written.
    pub async fn get(pool: &PgPool) -> Result<Option<AppMeta>, sqlx::Error> {
        sqlx::query_as::<_, AppMeta>(
            "SELECT last_deploy_id, updated_at FROM app_meta WHERE id = 1",
        )
        .fetch_optional(pool)
        .await
    }

    /// Last recorded deployment identifier, read inside the init transaction.
    pub(crate) async fn last_deploy_id(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    ) -> Result<Option<String>, sqlx::Error> {
        let row: Option<(String,)> =
            sqlx::query_as("SELECT last_deploy_id FROM app_meta WHERE id = 1")
                .fetch_optional(&mut **tx)
                .await?;
        Ok(row.map(|(id,)| id))
    }

    /// Store `deploy_id` as the last seen deployment.
    pub(crate) async fn record_deploy(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        deploy_id: &str,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO app_meta (id, last_deploy_id) VALUES (1, $1) \
             ON CONFLICT (id) \
             DO UPDATE SET last_deploy_id = EXCLUDED.last_deploy_id, updated_at = NOW()",
        )
        .bind(deploy_id)
        .execute(&mut **tx)
        .await?;
        Ok(())
    }
}
