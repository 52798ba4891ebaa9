//! Context bootstrap
//!
//! Builds a [`ServiceContext`] from [`AppConfig`]: the counter/config
//! backend and the cache variant are selected here, explicitly, and a
//! bad or missing setting aborts startup before any event is handled.

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tracing::info;

use emostat_cache::{DisabledCache, MemoryResultCache, RedisPool, RedisResultCache};
use emostat_common::{AppConfig, BackendKind, CacheKind};
use emostat_core::{CommunityConfigStore, CounterStore, ResultCache};
use emostat_db::{
    create_pool, DatabaseConfig, MemoryCommunityConfigStore, MemoryCounterStore,
    PgCommunityConfigStore, PgCounterStore,
};

use crate::services::{ServiceContext, ServiceContextBuilder, ServiceError};

/// Errors raised while wiring the context. All fatal.
#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error("database connection failed: {0}")]
    Database(#[from] sqlx::Error),

    #[error("redis pool setup failed: {0}")]
    Redis(#[from] emostat_cache::RedisPoolError),

    #[error("configuration incomplete: {0}")]
    Config(String),

    #[error(transparent)]
    Service(#[from] ServiceError),
}

/// Build the service context for the configured backend and cache.
///
/// # Errors
/// Fails when the selected variant cannot be brought up (unreachable
/// database, bad Redis URL) or its configuration section is missing.
pub async fn build_context(config: &AppConfig) -> Result<ServiceContext, BootstrapError> {
    let (counter_store, config_store): (Arc<dyn CounterStore>, Arc<dyn CommunityConfigStore>) =
        match config.backend {
            BackendKind::Postgres => {
                let database = config
                    .database
                    .as_ref()
                    .ok_or_else(|| BootstrapError::Config("database section missing".into()))?;
                let pool = create_pool(&DatabaseConfig::from_app_config(database)).await?;
                info!(backend = "postgres", "Counter store ready");
                (
                    Arc::new(PgCounterStore::new(pool.clone())),
                    Arc::new(PgCommunityConfigStore::new(pool)),
                )
            }
            BackendKind::Memory => {
                info!(backend = "memory", "Counter store ready");
                (
                    Arc::new(MemoryCounterStore::new()),
                    Arc::new(MemoryCommunityConfigStore::new()),
                )
            }
        };

    let result_cache: Arc<dyn ResultCache> = match config.cache.kind {
        CacheKind::Redis => {
            let redis = config
                .redis
                .as_ref()
                .ok_or_else(|| BootstrapError::Config("redis section missing".into()))?;
            let pool = RedisPool::from_config(redis)?;
            pool.health_check().await?;
            info!(cache = "redis", ttl_secs = config.cache.ttl_secs, "Result cache ready");
            Arc::new(RedisResultCache::new(pool))
        }
        CacheKind::Memory => {
            info!(cache = "memory", ttl_secs = config.cache.ttl_secs, "Result cache ready");
            Arc::new(MemoryResultCache::new())
        }
        CacheKind::Disabled => {
            info!(cache = "disabled", "Every query will recompute");
            Arc::new(DisabledCache::new())
        }
    };

    let ctx = ServiceContextBuilder::new()
        .counter_store(counter_store)
        .result_cache(result_cache)
        .config_store(config_store)
        .cache_ttl(Duration::from_secs(config.cache.ttl_secs))
        .build()?;

    Ok(ctx)
}
