//! # emostat-core
//!
//! Domain layer containing the emoji model, the identifier codec, period
//! bucketing, and the store traits the rest of the system is built on.
//! This crate has zero dependencies on infrastructure (database, cache, etc.).

pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    CommunitySettings, Emoji, EmojiOccurrence, EventSource, SettingsPatch, StatsEntry,
};
pub use error::DomainError;
pub use traits::{CommunityConfigStore, CounterStore, ResultCache, StoreResult};
pub use value_objects::{EmojiUid, Period, Periods, Snowflake, SnowflakeParseError};
