//! PostgreSQL implementation of the counter store
//!
//! Counters live in one table keyed by (community, member, emoji UID,
//! period); increments are upsert arithmetic, which Postgres executes
//! atomically per row, so concurrent submitters never lose updates.
//! The raw occurrence log is a separate append-only table keyed by
//! source UID for deletion-by-source.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use emostat_core::{
    CounterStore, EmojiOccurrence, EmojiUid, EventSource, Period, Periods, Snowflake, StoreResult,
};

use crate::models::{CounterRowModel, COMMUNITY_SCOPE};

use super::error::map_db_error;

const UPSERT_COUNTER: &str = r#"
    INSERT INTO emoji_counters (community_id, member_id, emoji_uid, period, hits)
    VALUES ($1, $2, $3, $4, $5)
    ON CONFLICT (community_id, member_id, emoji_uid, period)
    DO UPDATE SET hits = emoji_counters.hits + EXCLUDED.hits
"#;

const INSERT_OCCURRENCE: &str = r#"
    INSERT INTO emoji_occurrences
        (source_uid, community_id, user_id, message_id, is_reaction, emoji_uid, count)
    VALUES ($1, $2, $3, $4, $5, $6, $7)
"#;

/// PostgreSQL implementation of [`CounterStore`]
#[derive(Clone)]
pub struct PgCounterStore {
    pool: PgPool,
}

impl PgCounterStore {
    /// Create a new PgCounterStore
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Apply a signed delta to all five current-period counters at both
    /// scopes. The period classification is taken once, here, so add
    /// and remove of the same occurrence hit the same buckets.
    async fn bump_counters(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        source: &EventSource,
        emoji_uid: &EmojiUid,
        delta: i64,
    ) -> StoreResult<()> {
        let periods = Periods::now();
        for period in periods.all() {
            for member_id in [COMMUNITY_SCOPE, source.user_id.into_inner()] {
                sqlx::query(UPSERT_COUNTER)
                    .bind(source.community_id.into_inner())
                    .bind(member_id)
                    .bind(emoji_uid.as_str())
                    .bind(period.key())
                    .bind(delta)
                    .execute(&mut **tx)
                    .await
                    .map_err(map_db_error)?;
            }
        }
        Ok(())
    }
}

#[async_trait]
impl CounterStore for PgCounterStore {
    #[instrument(skip(self))]
    async fn submit(
        &self,
        source: &EventSource,
        occurrence: &EmojiOccurrence,
    ) -> StoreResult<()> {
        let emoji_uid = occurrence.emoji.uid()?;

        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        sqlx::query(INSERT_OCCURRENCE)
            .bind(source.uid())
            .bind(source.community_id.into_inner())
            .bind(source.user_id.into_inner())
            .bind(source.message_id.into_inner())
            .bind(source.is_reaction)
            .bind(emoji_uid.as_str())
            .bind(occurrence.count)
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;

        self.bump_counters(&mut tx, source, &emoji_uid, occurrence.count)
            .await?;

        tx.commit().await.map_err(map_db_error)?;
        Ok(())
    }

    #[instrument(skip(self, items), fields(items = items.len()))]
    async fn submit_bulk(
        &self,
        items: &[(EventSource, EmojiOccurrence)],
    ) -> StoreResult<usize> {
        // Best-effort per item: one bad row must not block the rest,
        // and committed items are not rolled back.
        let mut committed = 0;
        for (source, occurrence) in items {
            match self.submit(source, occurrence).await {
                Ok(()) => committed += 1,
                Err(err) => {
                    tracing::warn!(
                        source_uid = %source.uid(),
                        emoji = %occurrence.emoji.name(),
                        error = %err,
                        "Skipping occurrence in bulk submit"
                    );
                }
            }
        }
        Ok(committed)
    }

    #[instrument(skip(self))]
    async fn remove(
        &self,
        source: &EventSource,
        occurrence: &EmojiOccurrence,
    ) -> StoreResult<()> {
        let emoji_uid = occurrence.emoji.uid()?;

        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        sqlx::query("DELETE FROM emoji_occurrences WHERE source_uid = $1 AND emoji_uid = $2")
            .bind(source.uid())
            .bind(emoji_uid.as_str())
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;

        self.bump_counters(&mut tx, source, &emoji_uid, -occurrence.count)
            .await?;

        tx.commit().await.map_err(map_db_error)?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn remove_all_for_source(&self, source: &EventSource) -> StoreResult<u64> {
        // Deletes the raw log only. Aggregates stay as they are unless
        // the event handler also issues matching remove() calls; see the
        // consistency note on the trait.
        let result = sqlx::query("DELETE FROM emoji_occurrences WHERE source_uid = $1")
            .bind(source.uid())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.rows_affected())
    }

    #[instrument(skip(self))]
    async fn top(
        &self,
        community_id: Snowflake,
        member_id: Option<Snowflake>,
        period: Period,
        limit: i64,
    ) -> StoreResult<Vec<(EmojiUid, i64)>> {
        let member_id = member_id.map_or(COMMUNITY_SCOPE, Snowflake::into_inner);
        let limit = limit.max(1);

        let rows = sqlx::query_as::<_, CounterRowModel>(
            r#"
            SELECT emoji_uid, hits
            FROM emoji_counters
            WHERE community_id = $1 AND member_id = $2 AND period = $3 AND hits > 0
            ORDER BY hits DESC, emoji_uid ASC
            LIMIT $4
            "#,
        )
        .bind(community_id.into_inner())
        .bind(member_id)
        .bind(period.key())
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows
            .into_iter()
            .map(|row| (EmojiUid::new(row.emoji_uid), row.hits))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgCounterStore>();
    }
}
