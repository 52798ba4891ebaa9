//! Ingest service
//!
//! The write-side boundary: one call per platform event. All period
//! bucketing and dual-scope accounting happens inside the counter
//! store; this layer validates, forwards, and logs.

use emostat_core::{Emoji, EmojiOccurrence, EventSource};
use tracing::{info, instrument};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Ingest service
pub struct IngestService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> IngestService<'a> {
    /// Create a new IngestService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Record all emoji occurrences extracted from one message.
    ///
    /// Best-effort per occurrence: one bad item (e.g. an unresolvable
    /// short-name) is skipped, the rest commit. Returns how many
    /// occurrences were recorded.
    #[instrument(skip(self, occurrences), fields(occurrences = occurrences.len()))]
    pub async fn on_message(
        &self,
        source: EventSource,
        occurrences: Vec<EmojiOccurrence>,
    ) -> ServiceResult<usize> {
        if occurrences.is_empty() {
            return Ok(0);
        }

        let items: Vec<_> = occurrences
            .into_iter()
            .map(|occurrence| (source, occurrence))
            .collect();
        let committed = self.ctx.counter_store().submit_bulk(&items).await?;

        info!(
            source_uid = %source.uid(),
            committed,
            "Message occurrences recorded"
        );
        Ok(committed)
    }

    /// Record a single reaction being added
    #[instrument(skip(self))]
    pub async fn on_reaction_added(
        &self,
        source: EventSource,
        emoji: Emoji,
    ) -> ServiceResult<()> {
        let occurrence = EmojiOccurrence::new(emoji, 1);
        self.ctx.counter_store().submit(&source, &occurrence).await?;

        info!(
            source_uid = %source.uid(),
            emoji = %occurrence.emoji.name(),
            "Reaction recorded"
        );
        Ok(())
    }

    /// Undo a previously recorded reaction
    #[instrument(skip(self))]
    pub async fn on_reaction_removed(
        &self,
        source: EventSource,
        emoji: Emoji,
    ) -> ServiceResult<()> {
        let occurrence = EmojiOccurrence::new(emoji, 1);
        self.ctx.counter_store().remove(&source, &occurrence).await?;

        info!(
            source_uid = %source.uid(),
            emoji = %occurrence.emoji.name(),
            "Reaction removal recorded"
        );
        Ok(())
    }

    /// Drop the raw occurrence log for a deleted message.
    ///
    /// Counters are left as they are; see
    /// [`CounterStore::remove_all_for_source`](emostat_core::CounterStore::remove_all_for_source).
    /// Returns the number of raw records deleted.
    #[instrument(skip(self))]
    pub async fn on_message_deleted(&self, source: EventSource) -> ServiceResult<u64> {
        let removed = self
            .ctx
            .counter_store()
            .remove_all_for_source(&source)
            .await?;

        info!(
            source_uid = %source.uid(),
            removed,
            "Source occurrences purged"
        );
        Ok(removed)
    }
}
