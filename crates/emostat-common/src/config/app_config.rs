//! Application configuration structs
//!
//! Loads configuration from environment variables (with `.env` support).
//! Backend and cache variants are selected here, explicitly, at startup;
//! a missing or invalid setting fails fast before any traffic is served.

use serde::Deserialize;
use std::env;

/// Main application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub app: AppSettings,
    /// Which counter/config store implementation to run against
    pub backend: BackendKind,
    /// Present iff `backend` is [`BackendKind::Postgres`]
    pub database: Option<DatabaseConfig>,
    pub cache: CacheSettings,
    /// Present iff the cache kind is [`CacheKind::Redis`]
    pub redis: Option<RedisConfig>,
}

/// General application settings
#[derive(Debug, Clone)]
pub struct AppSettings {
    pub name: String,
    pub env: Environment,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }
}

/// Counter store backend variant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    /// PostgreSQL-backed counters and occurrence log
    Postgres,
    /// In-process store for development and tests
    Memory,
}

/// Result cache variant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheKind {
    Redis,
    Memory,
    /// Always-miss: every query recomputes
    Disabled,
}

/// Result cache settings
#[derive(Debug, Clone)]
pub struct CacheSettings {
    pub kind: CacheKind,
    /// Snapshot lifetime in seconds
    pub ttl_secs: u64,
}

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

/// Redis configuration
#[derive(Debug, Clone)]
pub struct RedisConfig {
    pub url: String,
    pub max_connections: u32,
}

// Default value functions
fn default_app_name() -> String {
    "emostat".to_string()
}

fn default_max_connections() -> u32 {
    20
}

fn default_min_connections() -> u32 {
    5
}

fn default_redis_max_connections() -> u32 {
    10
}

/// Default snapshot TTL: 10 minutes
fn default_cache_ttl_secs() -> u64 {
    600
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if a required variable for the selected backend
    /// or cache variant is missing, or a variant name is unknown.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let backend = match env::var("BACKEND").as_deref() {
            Ok("postgres") => BackendKind::Postgres,
            Ok("memory") | Err(_) => BackendKind::Memory,
            Ok(other) => {
                return Err(ConfigError::InvalidValue("BACKEND", other.to_string()));
            }
        };

        let database = match backend {
            BackendKind::Postgres => Some(DatabaseConfig {
                url: env::var("DATABASE_URL")
                    .map_err(|_| ConfigError::MissingVar("DATABASE_URL"))?,
                max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(default_max_connections),
                min_connections: env::var("DATABASE_MIN_CONNECTIONS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(default_min_connections),
            }),
            BackendKind::Memory => None,
        };

        let enabled = env::var("CACHE_ENABLED")
            .ok()
            .and_then(|s| s.parse::<bool>().ok())
            .unwrap_or(true);

        let kind = if !enabled {
            CacheKind::Disabled
        } else {
            match env::var("CACHE").as_deref() {
                Ok("redis") => CacheKind::Redis,
                Ok("memory") | Err(_) => CacheKind::Memory,
                Ok("disabled") | Ok("off") => CacheKind::Disabled,
                Ok(other) => {
                    return Err(ConfigError::InvalidValue("CACHE", other.to_string()));
                }
            }
        };

        let redis = match kind {
            CacheKind::Redis => Some(RedisConfig {
                url: env::var("REDIS_URL").map_err(|_| ConfigError::MissingVar("REDIS_URL"))?,
                max_connections: env::var("REDIS_MAX_CONNECTIONS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(default_redis_max_connections),
            }),
            CacheKind::Memory | CacheKind::Disabled => None,
        };

        Ok(Self {
            app: AppSettings {
                name: env::var("APP_NAME").unwrap_or_else(|_| default_app_name()),
                env: env::var("APP_ENV")
                    .ok()
                    .and_then(|s| match s.to_lowercase().as_str() {
                        "production" => Some(Environment::Production),
                        "staging" => Some(Environment::Staging),
                        "development" => Some(Environment::Development),
                        _ => None,
                    })
                    .unwrap_or_default(),
            },
            backend,
            database,
            cache: CacheSettings {
                kind,
                ttl_secs: env::var("CACHE_TTL_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(default_cache_ttl_secs),
            },
            redis,
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
