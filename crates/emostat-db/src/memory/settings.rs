//! In-process implementation of the community config store

use async_trait::async_trait;
use dashmap::DashMap;

use emostat_core::{CommunityConfigStore, CommunitySettings, SettingsPatch, Snowflake, StoreResult};

/// In-process implementation of [`CommunityConfigStore`]
#[derive(Debug, Default)]
pub struct MemoryCommunityConfigStore {
    settings: DashMap<i64, CommunitySettings>,
}

impl MemoryCommunityConfigStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CommunityConfigStore for MemoryCommunityConfigStore {
    async fn get(&self, community_id: Snowflake) -> StoreResult<Option<CommunitySettings>> {
        Ok(self
            .settings
            .get(&community_id.into_inner())
            .map(|entry| entry.clone()))
    }

    async fn update(
        &self,
        community_id: Snowflake,
        patch: SettingsPatch,
        overwrite: bool,
    ) -> StoreResult<()> {
        let mut entry = self
            .settings
            .entry(community_id.into_inner())
            .or_default();
        let base = if overwrite {
            CommunitySettings::default()
        } else {
            entry.clone()
        };
        *entry = patch.apply_to(&base);
        Ok(())
    }
}
