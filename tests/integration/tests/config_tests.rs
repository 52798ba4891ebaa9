//! Configuration parsing scenarios
//!
//! Environment variables are process-global, so everything runs inside
//! one test body, sequentially.

use emostat_common::{AppConfig, BackendKind, CacheKind, ConfigError};

fn clear_env() {
    for var in [
        "BACKEND",
        "DATABASE_URL",
        "DATABASE_MAX_CONNECTIONS",
        "DATABASE_MIN_CONNECTIONS",
        "CACHE",
        "CACHE_ENABLED",
        "CACHE_TTL_SECS",
        "REDIS_URL",
        "APP_ENV",
        "APP_NAME",
    ] {
        std::env::remove_var(var);
    }
}

#[test]
fn test_config_variants() {
    // Defaults: memory backend, memory cache, 10 minute TTL
    clear_env();
    let config = AppConfig::from_env().unwrap();
    assert_eq!(config.backend, BackendKind::Memory);
    assert!(config.database.is_none());
    assert_eq!(config.cache.kind, CacheKind::Memory);
    assert_eq!(config.cache.ttl_secs, 600);

    // Postgres without a URL fails fast
    clear_env();
    std::env::set_var("BACKEND", "postgres");
    let err = AppConfig::from_env().unwrap_err();
    assert!(matches!(err, ConfigError::MissingVar("DATABASE_URL")));

    // Postgres with a URL carries the database section
    std::env::set_var("DATABASE_URL", "postgresql://localhost/emostat_test");
    let config = AppConfig::from_env().unwrap();
    assert_eq!(config.backend, BackendKind::Postgres);
    assert_eq!(
        config.database.unwrap().url,
        "postgresql://localhost/emostat_test"
    );

    // Redis cache without a URL fails fast
    clear_env();
    std::env::set_var("CACHE", "redis");
    let err = AppConfig::from_env().unwrap_err();
    assert!(matches!(err, ConfigError::MissingVar("REDIS_URL")));

    // The enable flag forces the disabled cache regardless of CACHE
    clear_env();
    std::env::set_var("CACHE", "redis");
    std::env::set_var("CACHE_ENABLED", "false");
    let config = AppConfig::from_env().unwrap();
    assert_eq!(config.cache.kind, CacheKind::Disabled);
    assert!(config.redis.is_none());

    // Unknown backend names are rejected, not defaulted
    clear_env();
    std::env::set_var("BACKEND", "mongodb");
    let err = AppConfig::from_env().unwrap_err();
    assert!(matches!(err, ConfigError::InvalidValue("BACKEND", _)));

    // TTL override
    clear_env();
    std::env::set_var("CACHE_TTL_SECS", "90");
    let config = AppConfig::from_env().unwrap();
    assert_eq!(config.cache.ttl_secs, 90);

    clear_env();
}
