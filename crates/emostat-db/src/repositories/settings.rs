//! PostgreSQL implementation of the community config store

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use emostat_core::{
    CommunityConfigStore, CommunitySettings, SettingsPatch, Snowflake, StoreResult,
};

use crate::models::CommunitySettingsModel;

use super::error::map_db_error;

/// PostgreSQL implementation of [`CommunityConfigStore`]
#[derive(Clone)]
pub struct PgCommunityConfigStore {
    pool: PgPool,
}

impl PgCommunityConfigStore {
    /// Create a new PgCommunityConfigStore
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CommunityConfigStore for PgCommunityConfigStore {
    #[instrument(skip(self))]
    async fn get(&self, community_id: Snowflake) -> StoreResult<Option<CommunitySettings>> {
        let row = sqlx::query_as::<_, CommunitySettingsModel>(
            r#"
            SELECT community_id, timezone_offset_minutes, locale, command_prefix, active
            FROM community_settings
            WHERE community_id = $1
            "#,
        )
        .bind(community_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(row.map(CommunitySettings::from))
    }

    #[instrument(skip(self))]
    async fn has(&self, community_id: Snowflake) -> StoreResult<bool> {
        let exists: Option<i64> = sqlx::query_scalar(
            "SELECT 1::BIGINT FROM community_settings WHERE community_id = $1",
        )
        .bind(community_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(exists.is_some())
    }

    #[instrument(skip(self))]
    async fn update(
        &self,
        community_id: Snowflake,
        patch: SettingsPatch,
        overwrite: bool,
    ) -> StoreResult<()> {
        // Read-modify-write; settings updates are rare operator actions,
        // so the lost-update window is acceptable here.
        let base = if overwrite {
            CommunitySettings::default()
        } else {
            self.get(community_id).await?.unwrap_or_default()
        };
        let merged = patch.apply_to(&base);

        sqlx::query(
            r#"
            INSERT INTO community_settings
                (community_id, timezone_offset_minutes, locale, command_prefix, active)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (community_id)
            DO UPDATE SET
                timezone_offset_minutes = EXCLUDED.timezone_offset_minutes,
                locale = EXCLUDED.locale,
                command_prefix = EXCLUDED.command_prefix,
                active = EXCLUDED.active
            "#,
        )
        .bind(community_id.into_inner())
        .bind(merged.timezone_offset_minutes)
        .bind(&merged.locale)
        .bind(&merged.command_prefix)
        .bind(merged.active)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }
}
