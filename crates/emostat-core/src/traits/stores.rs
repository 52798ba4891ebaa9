//! Store traits (ports) - the interfaces concrete backends implement
//!
//! The domain layer defines what it needs; the infrastructure crates
//! provide the implementations, selected explicitly at startup. These
//! are the only shared mutable resources in the system: each store is
//! the sole arbiter of per-key atomicity and must be safe to call from
//! many tasks concurrently.

use std::time::Duration;

use async_trait::async_trait;

use crate::entities::{CommunitySettings, EmojiOccurrence, EventSource, SettingsPatch};
use crate::error::DomainError;
use crate::value_objects::{EmojiUid, Period, Snowflake};

/// Result type for store operations
pub type StoreResult<T> = Result<T, DomainError>;

/// Running (community, member, emoji, period) tallies plus the raw
/// occurrence log used for deletion-by-source.
#[async_trait]
pub trait CounterStore: Send + Sync {
    /// Record an occurrence: add its count to all five current-period
    /// counters at both community scope and member scope, and append a
    /// raw log record under the source UID.
    ///
    /// The per-key addition must be atomic (commutative merge); callers
    /// may submit concurrently for the same key without lost updates.
    async fn submit(&self, source: &EventSource, occurrence: &EmojiOccurrence)
        -> StoreResult<()>;

    /// Batched submission, best-effort per item: one failing item never
    /// blocks commit of the others, and there is no rollback. Returns
    /// how many items committed.
    async fn submit_bulk(
        &self,
        items: &[(EventSource, EmojiOccurrence)],
    ) -> StoreResult<usize> {
        let mut committed = 0;
        for (source, occurrence) in items {
            if self.submit(source, occurrence).await.is_ok() {
                committed += 1;
            }
        }
        Ok(committed)
    }

    /// The inverse of [`submit`](Self::submit): subtract the count from
    /// the same 5x2 counters and drop the matching raw records. Uses
    /// the same moment-in-time period classification as submit.
    async fn remove(&self, source: &EventSource, occurrence: &EmojiOccurrence)
        -> StoreResult<()>;

    /// Delete every raw occurrence record tied to this source (message
    /// deletion path). Aggregate counters are NOT decremented here: a
    /// full reversal requires the event handler to issue the matching
    /// [`remove`](Self::remove) calls. Returns the number of raw
    /// records deleted.
    async fn remove_all_for_source(&self, source: &EventSource) -> StoreResult<u64>;

    /// Raw `(emoji_uid, hits)` rows for the scope, highest hits first,
    /// ties broken by ascending UID, truncated to `limit`. Rows with a
    /// non-positive tally are excluded. Pure read.
    async fn top(
        &self,
        community_id: Snowflake,
        member_id: Option<Snowflake>,
        period: Period,
        limit: i64,
    ) -> StoreResult<Vec<(EmojiUid, i64)>>;
}

/// Time-boxed memoization of aggregation snapshots.
///
/// Strictly non-authoritative: the system must behave identically with
/// the always-miss implementation plugged in. An expired entry is
/// indistinguishable from an absent one.
#[async_trait]
pub trait ResultCache: Send + Sync {
    /// Look up a snapshot; `None` covers both "absent" and "expired"
    async fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>>;

    /// Store a snapshot for at most `ttl`
    async fn put(&self, key: &str, value: &[u8], ttl: Duration) -> StoreResult<()>;

    /// Drop all cached snapshots
    async fn clear(&self) -> StoreResult<()>;
}

/// Per-community presentation settings (thin boundary contract).
#[async_trait]
pub trait CommunityConfigStore: Send + Sync {
    /// Stored settings for a community, if any were ever written
    async fn get(&self, community_id: Snowflake) -> StoreResult<Option<CommunitySettings>>;

    /// Whether the community has stored settings
    async fn has(&self, community_id: Snowflake) -> StoreResult<bool> {
        Ok(self.get(community_id).await?.is_some())
    }

    /// Apply a partial update. With `overwrite`, the patch is applied on
    /// top of the defaults instead of the stored values.
    async fn update(
        &self,
        community_id: Snowflake,
        patch: SettingsPatch,
        overwrite: bool,
    ) -> StoreResult<()>;
}
