//! Service context - dependency container for services
//!
//! Holds the stores and cache the services run against. Backend
//! selection happens once, in bootstrap; from here on everything is a
//! trait object.

use std::sync::Arc;
use std::time::Duration;

use emostat_core::{CommunityConfigStore, CounterStore, ResultCache};

/// Default snapshot lifetime when the builder is not given one
const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(600);

/// Service context containing all dependencies
///
/// This is the dependency container passed to all services. It provides
/// access to:
/// - The counter store (tallies + raw occurrence log)
/// - The result cache for aggregation snapshots
/// - The community config store for presentation settings
#[derive(Clone)]
pub struct ServiceContext {
    counter_store: Arc<dyn CounterStore>,
    result_cache: Arc<dyn ResultCache>,
    config_store: Arc<dyn CommunityConfigStore>,
    cache_ttl: Duration,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    pub fn new(
        counter_store: Arc<dyn CounterStore>,
        result_cache: Arc<dyn ResultCache>,
        config_store: Arc<dyn CommunityConfigStore>,
        cache_ttl: Duration,
    ) -> Self {
        Self {
            counter_store,
            result_cache,
            config_store,
            cache_ttl,
        }
    }

    /// Get the counter store
    pub fn counter_store(&self) -> &dyn CounterStore {
        self.counter_store.as_ref()
    }

    /// Get the result cache
    pub fn result_cache(&self) -> &dyn ResultCache {
        self.result_cache.as_ref()
    }

    /// Get the community config store
    pub fn config_store(&self) -> &dyn CommunityConfigStore {
        self.config_store.as_ref()
    }

    /// Lifetime applied to cached snapshots
    pub fn cache_ttl(&self) -> Duration {
        self.cache_ttl
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("counter_store", &"dyn CounterStore")
            .field("result_cache", &"dyn ResultCache")
            .field("config_store", &"dyn CommunityConfigStore")
            .field("cache_ttl", &self.cache_ttl)
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
#[derive(Default)]
pub struct ServiceContextBuilder {
    counter_store: Option<Arc<dyn CounterStore>>,
    result_cache: Option<Arc<dyn ResultCache>>,
    config_store: Option<Arc<dyn CommunityConfigStore>>,
    cache_ttl: Option<Duration>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn counter_store(mut self, store: Arc<dyn CounterStore>) -> Self {
        self.counter_store = Some(store);
        self
    }

    pub fn result_cache(mut self, cache: Arc<dyn ResultCache>) -> Self {
        self.result_cache = Some(cache);
        self
    }

    pub fn config_store(mut self, store: Arc<dyn CommunityConfigStore>) -> Self {
        self.config_store = Some(store);
        self
    }

    pub fn cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = Some(ttl);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> super::error::ServiceResult<ServiceContext> {
        Ok(ServiceContext::new(
            self.counter_store
                .ok_or_else(|| super::error::ServiceError::validation("counter_store is required"))?,
            self.result_cache
                .ok_or_else(|| super::error::ServiceError::validation("result_cache is required"))?,
            self.config_store
                .ok_or_else(|| super::error::ServiceError::validation("config_store is required"))?,
            self.cache_ttl.unwrap_or(DEFAULT_CACHE_TTL),
        ))
    }
}
