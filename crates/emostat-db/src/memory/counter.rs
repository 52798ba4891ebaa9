//! In-process implementation of the counter store

use async_trait::async_trait;
use dashmap::DashMap;

use emostat_core::{
    CounterStore, EmojiOccurrence, EmojiUid, EventSource, Period, Periods, Snowflake, StoreResult,
};

use crate::models::COMMUNITY_SCOPE;

/// Full key of one running tally
type CounterKey = (i64, i64, EmojiUid, String);

/// In-process implementation of [`CounterStore`].
///
/// Per-key atomicity comes from the map's sharded entry locking: an
/// entry is bumped under its shard lock, so concurrent +1/-1 on the
/// same key never lose updates. The raw log keeps one emoji UID per
/// recorded occurrence, keyed by source UID for deletion-by-source.
#[derive(Debug, Default)]
pub struct MemoryCounterStore {
    counters: DashMap<CounterKey, i64>,
    log: DashMap<String, Vec<EmojiUid>>,
}

impl MemoryCounterStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn bump(&self, source: &EventSource, emoji_uid: &EmojiUid, delta: i64) {
        let periods = Periods::now();
        for period in periods.all() {
            for member_id in [COMMUNITY_SCOPE, source.user_id.into_inner()] {
                let key = (
                    source.community_id.into_inner(),
                    member_id,
                    emoji_uid.clone(),
                    period.key(),
                );
                *self.counters.entry(key).or_insert(0) += delta;
            }
        }
    }

    /// Current tally for one counter key; absent counters read as zero.
    /// Test and diagnostics helper, not part of the store trait.
    pub fn hits_for(
        &self,
        community_id: Snowflake,
        member_id: Option<Snowflake>,
        emoji_uid: &EmojiUid,
        period: Period,
    ) -> i64 {
        let member_id = member_id.map_or(COMMUNITY_SCOPE, Snowflake::into_inner);
        let key = (
            community_id.into_inner(),
            member_id,
            emoji_uid.clone(),
            period.key(),
        );
        self.counters.get(&key).map_or(0, |hits| *hits)
    }

    /// Number of raw log records currently held for a source
    pub fn raw_records_for(&self, source: &EventSource) -> usize {
        self.log.get(&source.uid()).map_or(0, |records| records.len())
    }
}

#[async_trait]
impl CounterStore for MemoryCounterStore {
    async fn submit(
        &self,
        source: &EventSource,
        occurrence: &EmojiOccurrence,
    ) -> StoreResult<()> {
        let emoji_uid = occurrence.emoji.uid()?;

        self.log.entry(source.uid()).or_default().push(emoji_uid.clone());
        self.bump(source, &emoji_uid, occurrence.count);
        Ok(())
    }

    async fn remove(
        &self,
        source: &EventSource,
        occurrence: &EmojiOccurrence,
    ) -> StoreResult<()> {
        let emoji_uid = occurrence.emoji.uid()?;

        if let Some(mut records) = self.log.get_mut(&source.uid()) {
            records.retain(|record| *record != emoji_uid);
        }
        self.bump(source, &emoji_uid, -occurrence.count);
        Ok(())
    }

    async fn remove_all_for_source(&self, source: &EventSource) -> StoreResult<u64> {
        // Raw log only; aggregates are left untouched by design
        let removed = self
            .log
            .remove(&source.uid())
            .map_or(0, |(_, records)| records.len() as u64);
        Ok(removed)
    }

    async fn top(
        &self,
        community_id: Snowflake,
        member_id: Option<Snowflake>,
        period: Period,
        limit: i64,
    ) -> StoreResult<Vec<(EmojiUid, i64)>> {
        let member_id = member_id.map_or(COMMUNITY_SCOPE, Snowflake::into_inner);
        let period_key = period.key();

        let mut rows: Vec<(EmojiUid, i64)> = self
            .counters
            .iter()
            .filter(|entry| {
                let (community, member, _, period) = entry.key();
                *community == community_id.into_inner()
                    && *member == member_id
                    && *period == period_key
                    && *entry.value() > 0
            })
            .map(|entry| (entry.key().2.clone(), *entry.value()))
            .collect();

        // Highest hits first; equal hits ordered by UID so repeated
        // queries agree on tie order
        rows.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        rows.truncate(usize::try_from(limit.max(1)).unwrap_or(usize::MAX));
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use emostat_core::Emoji;

    fn source() -> EventSource {
        EventSource::reaction(Snowflake::new(1), Snowflake::new(2), Snowflake::new(3))
    }

    #[tokio::test]
    async fn test_submit_updates_both_scopes_in_all_periods() {
        let store = MemoryCounterStore::new();
        let occurrence = EmojiOccurrence::new(Emoji::unicode("tada"), 2);
        store.submit(&source(), &occurrence).await.unwrap();

        let uid = occurrence.emoji.uid().unwrap();
        for period in Periods::now().all() {
            assert_eq!(store.hits_for(Snowflake::new(1), None, &uid, period), 2);
            assert_eq!(
                store.hits_for(Snowflake::new(1), Some(Snowflake::new(3)), &uid, period),
                2
            );
        }
    }

    #[tokio::test]
    async fn test_submit_then_remove_restores_every_counter() {
        let store = MemoryCounterStore::new();
        let occurrence = EmojiOccurrence::new(Emoji::unicode("tada"), 3);
        let uid = occurrence.emoji.uid().unwrap();

        store.submit(&source(), &occurrence).await.unwrap();
        store.remove(&source(), &occurrence).await.unwrap();

        for period in Periods::now().all() {
            assert_eq!(store.hits_for(Snowflake::new(1), None, &uid, period), 0);
            assert_eq!(
                store.hits_for(Snowflake::new(1), Some(Snowflake::new(3)), &uid, period),
                0
            );
        }
        assert_eq!(store.raw_records_for(&source()), 0);
    }

    #[tokio::test]
    async fn test_top_orders_by_hits_then_uid() {
        let store = MemoryCounterStore::new();
        let src = source();
        for _ in 0..3 {
            store
                .submit(&src, &EmojiOccurrence::unicode("tada"))
                .await
                .unwrap();
        }
        store
            .submit(&src, &EmojiOccurrence::unicode("heart"))
            .await
            .unwrap();
        store
            .submit(&src, &EmojiOccurrence::unicode("fire"))
            .await
            .unwrap();

        let top = store
            .top(Snowflake::new(1), None, Period::Total, 10)
            .await
            .unwrap();
        assert_eq!(top.len(), 3);
        assert_eq!(top[0].0, Emoji::unicode("tada").uid().unwrap());
        assert_eq!(top[0].1, 3);
        // fire and heart tie at 1; their UIDs decide the order
        assert!(top[1].0 < top[2].0);
        assert_eq!(top[1].1, 1);
        assert_eq!(top[2].1, 1);
    }

    #[tokio::test]
    async fn test_top_respects_limit_and_scope() {
        let store = MemoryCounterStore::new();
        store
            .submit(&source(), &EmojiOccurrence::unicode("tada"))
            .await
            .unwrap();

        let other_community = store
            .top(Snowflake::new(99), None, Period::Total, 10)
            .await
            .unwrap();
        assert!(other_community.is_empty());

        let other_member = store
            .top(Snowflake::new(1), Some(Snowflake::new(42)), Period::Total, 10)
            .await
            .unwrap();
        assert!(other_member.is_empty());
    }

    #[tokio::test]
    async fn test_remove_all_for_source_leaves_counters() {
        let store = MemoryCounterStore::new();
        let occurrence = EmojiOccurrence::unicode("tada");
        let uid = occurrence.emoji.uid().unwrap();
        store.submit(&source(), &occurrence).await.unwrap();

        let removed = store.remove_all_for_source(&source()).await.unwrap();
        assert_eq!(removed, 1);
        assert_eq!(store.raw_records_for(&source()), 0);
        // Aggregates drift until matching remove() calls are issued
        assert_eq!(
            store.hits_for(Snowflake::new(1), None, &uid, Period::Total),
            1
        );
    }

    #[tokio::test]
    async fn test_bulk_submit_skips_bad_items() {
        let store = MemoryCounterStore::new();
        let items = vec![
            (source(), EmojiOccurrence::unicode("tada")),
            // unknown short-name: encoding fails, item is skipped
            (source(), EmojiOccurrence::unicode("not_a_real_emoji")),
            (source(), EmojiOccurrence::unicode("heart")),
        ];
        let committed = store.submit_bulk(&items).await.unwrap();
        assert_eq!(committed, 2);

        let top = store
            .top(Snowflake::new(1), None, Period::Total, 10)
            .await
            .unwrap();
        assert_eq!(top.len(), 2);
    }
}
