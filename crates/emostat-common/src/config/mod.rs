//! Configuration loading

mod app_config;

pub use app_config::{
    AppConfig, AppSettings, BackendKind, CacheKind, CacheSettings, ConfigError, DatabaseConfig,
    Environment, RedisConfig,
};
