//! Always-miss cache for running with caching off
//!
//! Correctness never depends on the cache, so turning it off degrades
//! every lookup to a recomputation and nothing else.

use std::time::Duration;

use async_trait::async_trait;

use emostat_core::{ResultCache, StoreResult};

/// Cache implementation that never stores anything
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledCache;

impl DisabledCache {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ResultCache for DisabledCache {
    async fn get(&self, _key: &str) -> StoreResult<Option<Vec<u8>>> {
        Ok(None)
    }

    async fn put(&self, _key: &str, _value: &[u8], _ttl: Duration) -> StoreResult<()> {
        Ok(())
    }

    async fn clear(&self) -> StoreResult<()> {
        Ok(())
    }
}
