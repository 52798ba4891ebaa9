//! In-process result cache
//!
//! Map of key to (snapshot, expiry). Expired entries are evicted lazily
//! on lookup; there is no background sweeper, which is fine for the
//! short TTLs this cache is used with.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;

use emostat_core::{ResultCache, StoreResult};

/// Result cache backed by an in-process concurrent map
#[derive(Debug, Default)]
pub struct MemoryResultCache {
    entries: DashMap<String, CachedValue>,
}

#[derive(Debug, Clone)]
struct CachedValue {
    value: Vec<u8>,
    expires_at: DateTime<Utc>,
}

impl MemoryResultCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Lookup against an explicit clock. A value whose expiry has passed
    /// is never returned and is dropped on the way out.
    pub fn get_at(&self, key: &str, now: DateTime<Utc>) -> Option<Vec<u8>> {
        // Evict first so the read below never observes a stale entry
        self.entries.remove_if(key, |_, entry| now > entry.expires_at);
        self.entries.get(key).map(|entry| entry.value.clone())
    }

    /// Insert against an explicit clock
    pub fn put_at(&self, key: &str, value: &[u8], ttl: Duration, now: DateTime<Utc>) {
        let ttl = chrono::Duration::from_std(ttl).unwrap_or(chrono::Duration::zero());
        self.entries.insert(
            key.to_string(),
            CachedValue {
                value: value.to_vec(),
                expires_at: now + ttl,
            },
        );
    }

    /// Number of live entries (expired but unevicted entries included)
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl ResultCache for MemoryResultCache {
    async fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        Ok(self.get_at(key, Utc::now()))
    }

    async fn put(&self, key: &str, value: &[u8], ttl: Duration) -> StoreResult<()> {
        self.put_at(key, value, ttl, Utc::now());
        Ok(())
    }

    async fn clear(&self) -> StoreResult<()> {
        self.entries.clear();
        Ok(())
    }
}
