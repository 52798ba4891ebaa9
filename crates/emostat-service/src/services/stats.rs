//! Stats service
//!
//! The read-side: top-N aggregation with percentage presentation and a
//! time-boxed snapshot cache in front of the counter store. Pure read
//! with respect to the counters.

use chrono::Utc;
use tracing::{debug, instrument, warn};

use emostat_core::{Emoji, Period, Snowflake, StatsEntry};

use crate::dto::StatsReport;

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Upper bound on rows per query; platform embeds cannot show more
const MAX_TOP_LIMIT: i64 = 50;

/// Stats service
pub struct StatsService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> StatsService<'a> {
    /// Create a new StatsService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Top `limit` emoji for the scope, with percentages.
    ///
    /// Percentages are relative to the mentions of the rows actually
    /// returned, so the listed shares always close to 100. An empty
    /// scope yields an empty vec. Snapshots are cached under a key
    /// derived from the full scope; cache failures degrade to a
    /// recompute and are never surfaced.
    #[instrument(skip(self))]
    pub async fn top_n(
        &self,
        community_id: Snowflake,
        member_id: Option<Snowflake>,
        period: Period,
        limit: i64,
    ) -> ServiceResult<Vec<StatsEntry>> {
        let limit = limit.clamp(1, MAX_TOP_LIMIT);
        let key = cache_key(community_id, member_id, period, limit);

        match self.ctx.result_cache().get(&key).await {
            Ok(Some(bytes)) => match serde_json::from_slice::<Vec<StatsEntry>>(&bytes) {
                Ok(entries) => {
                    debug!(key = %key, "Snapshot served from cache");
                    return Ok(entries);
                }
                // Stale snapshot shape; recompute and overwrite
                Err(err) => warn!(key = %key, error = %err, "Discarding undecodable snapshot"),
            },
            Ok(None) => {}
            Err(err) => warn!(key = %key, error = %err, "Cache lookup failed"),
        }

        let rows = self
            .ctx
            .counter_store()
            .top(community_id, member_id, period, limit)
            .await?;

        let mut decoded: Vec<(Emoji, i64)> = Vec::with_capacity(rows.len());
        for (uid, hits) in rows {
            match Emoji::from_uid(&uid) {
                Ok(emoji) => decoded.push((emoji, hits)),
                // One corrupt key must not take down the whole answer
                Err(err) => warn!(uid = %uid, error = %err, "Skipping undecodable counter row"),
            }
        }

        let total: i64 = decoded.iter().map(|(_, hits)| hits).sum();
        let entries: Vec<StatsEntry> = decoded
            .into_iter()
            .map(|(emoji, hits)| StatsEntry {
                emoji,
                total_mentions: hits,
                percentage: percentage(hits, total),
            })
            .collect();

        match serde_json::to_vec(&entries) {
            Ok(bytes) => {
                if let Err(err) = self
                    .ctx
                    .result_cache()
                    .put(&key, &bytes, self.ctx.cache_ttl())
                    .await
                {
                    warn!(key = %key, error = %err, "Cache store failed");
                }
            }
            Err(err) => return Err(ServiceError::internal(err.to_string())),
        }

        Ok(entries)
    }

    /// [`top_n`](Self::top_n) with the period given as a human token
    /// (`year`, `month`, `week`, `day`, aliases; anything else means
    /// all-time). Communities marked inactive are not served.
    #[instrument(skip(self))]
    pub async fn query_top(
        &self,
        community_id: Snowflake,
        member_id: Option<Snowflake>,
        token: &str,
        limit: i64,
    ) -> ServiceResult<Vec<StatsEntry>> {
        if let Some(settings) = self.ctx.config_store().get(community_id).await? {
            if !settings.active {
                debug!(community_id = %community_id, "Community inactive, serving nothing");
                return Ok(Vec::new());
            }
        }

        let period = Period::from_token(token, Utc::now());
        self.top_n(community_id, member_id, period, limit).await
    }

    /// Full report for the command layer: header line plus entries.
    /// The header consults the community's stored presentation settings.
    #[instrument(skip(self))]
    pub async fn report(
        &self,
        community_id: Snowflake,
        member_id: Option<Snowflake>,
        token: &str,
        limit: i64,
    ) -> ServiceResult<StatsReport> {
        let settings = self
            .ctx
            .config_store()
            .get(community_id)
            .await?
            .unwrap_or_default();
        let period = Period::from_token(token, Utc::now());
        let entries = self.query_top(community_id, member_id, token, limit).await?;

        Ok(StatsReport {
            header: stats_header(member_id, period, &settings.locale),
            command_prefix: settings.command_prefix,
            period_key: period.key(),
            entries,
        })
    }
}

/// Snapshot key for one fully-qualified query.
///
/// Scope tag keeps community and member shapes from ever colliding.
fn cache_key(
    community_id: Snowflake,
    member_id: Option<Snowflake>,
    period: Period,
    limit: i64,
) -> String {
    match member_id {
        Some(member) => format!(
            "top:m:{community_id}:{member}:{period_key}:{limit}",
            period_key = period.key()
        ),
        None => format!(
            "top:c:{community_id}:{period_key}:{limit}",
            period_key = period.key()
        ),
    }
}

#[allow(clippy::cast_precision_loss)]
fn percentage(hits: i64, total: i64) -> f64 {
    if total <= 0 {
        return 0.0;
    }
    hits as f64 / total as f64 * 100.0
}

/// Header line for a stats response, in the community's locale
fn stats_header(member_id: Option<Snowflake>, period: Period, locale: &str) -> String {
    let period_key = period.key();
    match (locale, member_id) {
        ("de", Some(member)) => format!("Top-Emoji von {member} ({period_key})"),
        ("de", None) => format!("Top-Emoji des Servers ({period_key})"),
        (_, Some(member)) => format!("Top emoji for {member} ({period_key})"),
        (_, None) => format!("Top emoji server-wide ({period_key})"),
    }
}
