//! Aggregated stats entries produced by the top-N query

use serde::{Deserialize, Serialize};

use crate::entities::Emoji;

/// One row of a top-N result: an emoji, its raw hit count, and its
/// share of the returned set.
///
/// Produced only by the aggregator and never persisted directly; the
/// result cache stores serialized snapshots of whole result lists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsEntry {
    pub emoji: Emoji,
    /// Raw hit count within the queried scope and window
    pub total_mentions: i64,
    /// Share of the displayed top-N set, in [0, 100]. Not rounded here;
    /// presentation layers round.
    pub percentage: f64,
}

impl StatsEntry {
    pub fn new(emoji: Emoji, total_mentions: i64, percentage: f64) -> Self {
        Self {
            emoji,
            total_mentions,
            percentage,
        }
    }
}
