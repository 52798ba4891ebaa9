//! Community settings model

use sqlx::FromRow;

use emostat_core::CommunitySettings;

/// Row of the community settings table
#[derive(Debug, Clone, FromRow)]
pub struct CommunitySettingsModel {
    pub community_id: i64,
    pub timezone_offset_minutes: i32,
    pub locale: String,
    pub command_prefix: String,
    pub active: bool,
}

impl From<CommunitySettingsModel> for CommunitySettings {
    fn from(model: CommunitySettingsModel) -> Self {
        Self {
            timezone_offset_minutes: model.timezone_offset_minutes,
            locale: model.locale,
            command_prefix: model.command_prefix,
            active: model.active,
        }
    }
}
