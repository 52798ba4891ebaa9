//! Database models - SQLx-compatible structs for PostgreSQL tables

mod counter;
mod settings;

pub use counter::CounterRowModel;
pub use settings::CommunitySettingsModel;

/// Sentinel member id for the community-wide scope.
///
/// The counter table's primary key cannot contain NULL, and platform
/// snowflakes are never zero, so zero stands in for "no member".
pub const COMMUNITY_SCOPE: i64 = 0;
