//! Per-community presentation settings
//!
//! Consulted by the query path for display only (locale, prefix,
//! timezone offset); has no bearing on counter correctness.

use serde::{Deserialize, Serialize};

/// Settings stored per community
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommunitySettings {
    /// Offset from UTC in minutes, used when formatting period labels
    pub timezone_offset_minutes: i32,
    /// BCP 47-ish locale tag for response strings
    pub locale: String,
    /// Prefix the command layer listens for in this community
    pub command_prefix: String,
    /// Inactive communities keep their counters but stop being served
    pub active: bool,
}

impl Default for CommunitySettings {
    fn default() -> Self {
        Self {
            timezone_offset_minutes: 0,
            locale: "en".to_string(),
            command_prefix: "!".to_string(),
            active: true,
        }
    }
}

/// Partial update for community settings.
///
/// With `overwrite = false`, only the populated fields replace stored
/// values; with `overwrite = true`, the patch is applied on top of the
/// defaults, discarding anything previously stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsPatch {
    pub timezone_offset_minutes: Option<i32>,
    pub locale: Option<String>,
    pub command_prefix: Option<String>,
    pub active: Option<bool>,
}

impl SettingsPatch {
    /// Apply this patch on top of existing settings
    pub fn apply_to(&self, base: &CommunitySettings) -> CommunitySettings {
        CommunitySettings {
            timezone_offset_minutes: self
                .timezone_offset_minutes
                .unwrap_or(base.timezone_offset_minutes),
            locale: self.locale.clone().unwrap_or_else(|| base.locale.clone()),
            command_prefix: self
                .command_prefix
                .clone()
                .unwrap_or_else(|| base.command_prefix.clone()),
            active: self.active.unwrap_or(base.active),
        }
    }
}
