//! Stats response DTOs

use serde::{Deserialize, Serialize};

use emostat_core::StatsEntry;

/// Ready-to-render stats response for one query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsReport {
    /// Localized title line
    pub header: String,
    /// The prefix this community's commands are invoked with
    pub command_prefix: String,
    /// Storage key of the queried window, e.g. `YM202408`
    pub period_key: String,
    pub entries: Vec<StatsEntry>,
}

impl StatsReport {
    /// Whether the queried scope had no recorded emoji at all
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
