//! Test helpers for integration tests
//!
//! Wires a [`ServiceContext`] on the memory backends, keeping handles to
//! the concrete stores so tests can assert on raw state.

use std::sync::Arc;
use std::time::Duration;

use emostat_cache::{DisabledCache, MemoryResultCache};
use emostat_core::ResultCache;
use emostat_db::{MemoryCommunityConfigStore, MemoryCounterStore};
use emostat_service::{ServiceContext, ServiceContextBuilder};

/// A fully wired context on memory backends, with direct store handles
pub struct TestHarness {
    pub ctx: ServiceContext,
    pub counter_store: Arc<MemoryCounterStore>,
    pub config_store: Arc<MemoryCommunityConfigStore>,
}

impl TestHarness {
    /// Harness with caching disabled; every query recomputes
    pub fn without_cache() -> Self {
        Self::with_cache(Arc::new(DisabledCache::new()), Duration::from_secs(600))
    }

    /// Harness with the in-memory snapshot cache
    pub fn with_memory_cache(ttl: Duration) -> Self {
        Self::with_cache(Arc::new(MemoryResultCache::new()), ttl)
    }

    fn with_cache(cache: Arc<dyn ResultCache>, ttl: Duration) -> Self {
        let counter_store = Arc::new(MemoryCounterStore::new());
        let config_store = Arc::new(MemoryCommunityConfigStore::new());
        let ctx = ServiceContextBuilder::new()
            .counter_store(counter_store.clone())
            .result_cache(cache)
            .config_store(config_store.clone())
            .cache_ttl(ttl)
            .build()
            .expect("all stores provided");
        Self {
            ctx,
            counter_store,
            config_store,
        }
    }
}
