//! Redis-backed result cache
//!
//! Snapshots live under a dedicated key prefix; Redis key expiry
//! enforces the TTL, so an expired entry is simply absent on read.

use std::time::Duration;

use async_trait::async_trait;

use emostat_core::{DomainError, ResultCache, StoreResult};

use crate::pool::{RedisPool, RedisPoolError};

/// Key prefix for cached aggregation snapshots
const CACHE_KEY_PREFIX: &str = "emostat:cache:";

/// Result cache backed by Redis
#[derive(Debug, Clone)]
pub struct RedisResultCache {
    pool: RedisPool,
}

impl RedisResultCache {
    /// Create a new cache on top of an existing pool
    #[must_use]
    pub fn new(pool: RedisPool) -> Self {
        Self { pool }
    }

    fn key(key: &str) -> String {
        format!("{CACHE_KEY_PREFIX}{key}")
    }
}

/// Translate pool failures into the domain taxonomy: connectivity
/// problems surface as `StoreUnavailable` (retryable), everything else
/// as a cache error.
fn map_cache_error(e: RedisPoolError) -> DomainError {
    match e {
        RedisPoolError::CreatePool(_) | RedisPoolError::GetConnection(_) => {
            DomainError::StoreUnavailable(e.to_string())
        }
        RedisPoolError::Redis(ref err) if err.is_connection_refusal() || err.is_timeout() => {
            DomainError::StoreUnavailable(e.to_string())
        }
        RedisPoolError::Redis(_) => DomainError::Cache(e.to_string()),
    }
}

#[async_trait]
impl ResultCache for RedisResultCache {
    async fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        self.pool
            .get_bytes(&Self::key(key))
            .await
            .map_err(map_cache_error)
    }

    async fn put(&self, key: &str, value: &[u8], ttl: Duration) -> StoreResult<()> {
        // Redis rejects a zero expiry; clamp to the 1-second floor
        let ttl_seconds = ttl.as_secs().max(1);
        self.pool
            .set_bytes(&Self::key(key), value, ttl_seconds)
            .await
            .map_err(map_cache_error)
    }

    async fn clear(&self) -> StoreResult<()> {
        let deleted = self
            .pool
            .delete_by_pattern(&format!("{CACHE_KEY_PREFIX}*"))
            .await
            .map_err(map_cache_error)?;
        tracing::debug!(deleted, "Result cache cleared");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_prefixing() {
        assert_eq!(
            RedisResultCache::key("top:c:1:total:10"),
            "emostat:cache:top:c:1:total:10"
        );
    }
}
