//! End-to-end scenarios against the memory backends
//!
//! Run with: cargo test -p integration-tests --test stats_tests

use std::time::Duration;

use emostat_core::{
    CommunityConfigStore, CounterStore, Emoji, EmojiOccurrence, Period, Periods, SettingsPatch,
};
use emostat_service::{IngestService, StatsService};
use integration_tests::{Scope, TestHarness};

// ============================================================================
// Reaction lifecycle
// ============================================================================

#[tokio::test]
async fn test_react_three_times_remove_one() {
    let harness = TestHarness::without_cache();
    let scope = Scope::unique();
    let ingest = IngestService::new(&harness.ctx);

    // Three separate messages each get a 🎉 reaction from the same user
    let sources: Vec<_> = (0..3).map(|_| scope.message()).collect();
    for source in &sources {
        ingest
            .on_reaction_added(
                scope.reaction_on(source.message_id),
                Emoji::unicode("tada"),
            )
            .await
            .unwrap();
    }
    // One of them is taken back
    ingest
        .on_reaction_removed(
            scope.reaction_on(sources[0].message_id),
            Emoji::unicode("tada"),
        )
        .await
        .unwrap();

    let entries = StatsService::new(&harness.ctx)
        .top_n(scope.community_id, Some(scope.user_id), Period::Total, 10)
        .await
        .unwrap();

    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].emoji, Emoji::unicode("tada"));
    assert_eq!(entries[0].total_mentions, 2);
    assert!((entries[0].percentage - 100.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn test_add_remove_symmetry_across_all_counters() {
    let harness = TestHarness::without_cache();
    let scope = Scope::unique();
    let ingest = IngestService::new(&harness.ctx);

    let source = scope.message();
    let occurrence = EmojiOccurrence::new(Emoji::unicode("fire"), 4);
    ingest
        .on_message(source, vec![occurrence.clone()])
        .await
        .unwrap();
    harness
        .counter_store
        .remove(&source, &occurrence)
        .await
        .unwrap();

    let uid = Emoji::unicode("fire").uid().unwrap();
    for period in Periods::now().all() {
        assert_eq!(
            harness
                .counter_store
                .hits_for(scope.community_id, None, &uid, period),
            0
        );
        assert_eq!(
            harness
                .counter_store
                .hits_for(scope.community_id, Some(scope.user_id), &uid, period),
            0
        );
    }
}

// ============================================================================
// Aggregation and presentation
// ============================================================================

#[tokio::test]
async fn test_percentages_close_over_returned_rows() {
    let harness = TestHarness::without_cache();
    let scope = Scope::unique();
    let ingest = IngestService::new(&harness.ctx);

    ingest
        .on_message(
            scope.message(),
            vec![
                EmojiOccurrence::new(Emoji::unicode("tada"), 6),
                EmojiOccurrence::new(Emoji::unicode("heart"), 3),
                EmojiOccurrence::new(Emoji::custom("blob", 1234), 1),
            ],
        )
        .await
        .unwrap();

    let entries = StatsService::new(&harness.ctx)
        .top_n(scope.community_id, None, Period::Total, 10)
        .await
        .unwrap();

    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0].total_mentions, 6);
    let sum: f64 = entries.iter().map(|e| e.percentage).sum();
    assert!((sum - 100.0).abs() < 1e-9);
}

#[tokio::test]
async fn test_truncated_percentages_still_close() {
    let harness = TestHarness::without_cache();
    let scope = Scope::unique();

    IngestService::new(&harness.ctx)
        .on_message(
            scope.message(),
            vec![
                EmojiOccurrence::new(Emoji::unicode("tada"), 3),
                EmojiOccurrence::new(Emoji::unicode("heart"), 1),
            ],
        )
        .await
        .unwrap();

    // Only one row fits; its share of the returned set is all of it
    let entries = StatsService::new(&harness.ctx)
        .top_n(scope.community_id, None, Period::Total, 1)
        .await
        .unwrap();
    assert_eq!(entries.len(), 1);
    assert!((entries[0].percentage - 100.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn test_tie_break_is_deterministic() {
    let harness = TestHarness::without_cache();
    let scope = Scope::unique();

    IngestService::new(&harness.ctx)
        .on_message(
            scope.message(),
            vec![
                EmojiOccurrence::unicode("tada"),
                EmojiOccurrence::unicode("heart"),
                EmojiOccurrence::unicode("fire"),
            ],
        )
        .await
        .unwrap();

    let stats = StatsService::new(&harness.ctx);
    let first = stats
        .top_n(scope.community_id, None, Period::Total, 10)
        .await
        .unwrap();
    for _ in 0..5 {
        let again = stats
            .top_n(scope.community_id, None, Period::Total, 10)
            .await
            .unwrap();
        assert_eq!(first, again);
    }
}

#[tokio::test]
async fn test_member_scope_is_isolated() {
    let harness = TestHarness::without_cache();
    let scope = Scope::unique();
    let other = Scope {
        community_id: scope.community_id,
        user_id: integration_tests::unique_id(),
    };

    IngestService::new(&harness.ctx)
        .on_message(scope.message(), vec![EmojiOccurrence::unicode("tada")])
        .await
        .unwrap();
    IngestService::new(&harness.ctx)
        .on_message(other.message(), vec![EmojiOccurrence::unicode("heart")])
        .await
        .unwrap();

    let stats = StatsService::new(&harness.ctx);
    let member = stats
        .top_n(scope.community_id, Some(scope.user_id), Period::Total, 10)
        .await
        .unwrap();
    assert_eq!(member.len(), 1);
    assert_eq!(member[0].emoji, Emoji::unicode("tada"));

    let community = stats
        .top_n(scope.community_id, None, Period::Total, 10)
        .await
        .unwrap();
    assert_eq!(community.len(), 2);
}

// ============================================================================
// Snapshot cache
// ============================================================================

#[tokio::test]
async fn test_cached_snapshot_hides_new_writes() {
    let harness = TestHarness::with_memory_cache(Duration::from_secs(600));
    let scope = Scope::unique();
    let ingest = IngestService::new(&harness.ctx);
    let stats = StatsService::new(&harness.ctx);

    ingest
        .on_message(scope.message(), vec![EmojiOccurrence::unicode("tada")])
        .await
        .unwrap();
    let first = stats
        .top_n(scope.community_id, None, Period::Total, 10)
        .await
        .unwrap();

    ingest
        .on_message(
            scope.message(),
            vec![EmojiOccurrence::new(Emoji::unicode("fire"), 9)],
        )
        .await
        .unwrap();

    let second = stats
        .top_n(scope.community_id, None, Period::Total, 10)
        .await
        .unwrap();
    assert_eq!(first, second, "snapshot must be served until expiry");
}

#[tokio::test]
async fn test_disabled_cache_recomputes_every_time() {
    let harness = TestHarness::without_cache();
    let scope = Scope::unique();
    let ingest = IngestService::new(&harness.ctx);
    let stats = StatsService::new(&harness.ctx);

    ingest
        .on_message(scope.message(), vec![EmojiOccurrence::unicode("tada")])
        .await
        .unwrap();
    let first = stats
        .top_n(scope.community_id, None, Period::Total, 10)
        .await
        .unwrap();
    assert_eq!(first.len(), 1);

    ingest
        .on_message(
            scope.message(),
            vec![EmojiOccurrence::new(Emoji::unicode("fire"), 9)],
        )
        .await
        .unwrap();

    let second = stats
        .top_n(scope.community_id, None, Period::Total, 10)
        .await
        .unwrap();
    assert_eq!(second.len(), 2);
    assert_eq!(second[0].emoji, Emoji::unicode("fire"));
}

// ============================================================================
// Message deletion boundary
// ============================================================================

#[tokio::test]
async fn test_message_deletion_purges_log_not_counters() {
    let harness = TestHarness::without_cache();
    let scope = Scope::unique();
    let ingest = IngestService::new(&harness.ctx);

    let source = scope.message();
    ingest
        .on_message(
            source,
            vec![
                EmojiOccurrence::unicode("tada"),
                EmojiOccurrence::unicode("heart"),
            ],
        )
        .await
        .unwrap();

    let removed = ingest.on_message_deleted(source).await.unwrap();
    assert_eq!(removed, 2);
    assert_eq!(harness.counter_store.raw_records_for(&source), 0);

    // Aggregates still answer; deletion is a raw-log concern
    let entries = StatsService::new(&harness.ctx)
        .top_n(scope.community_id, None, Period::Total, 10)
        .await
        .unwrap();
    assert_eq!(entries.len(), 2);
}

// ============================================================================
// Bulk ingest
// ============================================================================

#[tokio::test]
async fn test_bulk_partial_failure_commits_the_rest() {
    let harness = TestHarness::without_cache();
    let scope = Scope::unique();

    let committed = IngestService::new(&harness.ctx)
        .on_message(
            scope.message(),
            vec![
                EmojiOccurrence::unicode("tada"),
                EmojiOccurrence::unicode("definitely_not_an_emoji"),
                EmojiOccurrence::unicode("heart"),
            ],
        )
        .await
        .unwrap();
    assert_eq!(committed, 2);

    let entries = StatsService::new(&harness.ctx)
        .top_n(scope.community_id, None, Period::Total, 10)
        .await
        .unwrap();
    assert_eq!(entries.len(), 2);
}

// ============================================================================
// Community settings
// ============================================================================

#[tokio::test]
async fn test_report_reflects_community_settings() {
    let harness = TestHarness::without_cache();
    let scope = Scope::unique();

    IngestService::new(&harness.ctx)
        .on_message(scope.message(), vec![EmojiOccurrence::unicode("tada")])
        .await
        .unwrap();

    harness
        .config_store
        .update(
            scope.community_id,
            SettingsPatch {
                locale: Some("de".to_string()),
                command_prefix: Some("?".to_string()),
                ..SettingsPatch::default()
            },
            false,
        )
        .await
        .unwrap();

    let report = StatsService::new(&harness.ctx)
        .report(scope.community_id, None, "total", 10)
        .await
        .unwrap();
    assert_eq!(report.command_prefix, "?");
    assert!(report.header.starts_with("Top-Emoji"));
    assert_eq!(report.entries.len(), 1);
}

#[tokio::test]
async fn test_inactive_community_serves_nothing() {
    let harness = TestHarness::without_cache();
    let scope = Scope::unique();

    IngestService::new(&harness.ctx)
        .on_message(scope.message(), vec![EmojiOccurrence::unicode("tada")])
        .await
        .unwrap();
    harness
        .config_store
        .update(
            scope.community_id,
            SettingsPatch {
                active: Some(false),
                ..SettingsPatch::default()
            },
            false,
        )
        .await
        .unwrap();

    let entries = StatsService::new(&harness.ctx)
        .query_top(scope.community_id, None, "total", 10)
        .await
        .unwrap();
    assert!(entries.is_empty());
}
