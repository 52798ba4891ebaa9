//! Domain entities

mod emoji;
mod settings;
mod source;
mod stats;

pub use emoji::{Emoji, EmojiOccurrence};
pub use settings::{CommunitySettings, SettingsPatch};
pub use source::EventSource;
pub use stats::StatsEntry;
