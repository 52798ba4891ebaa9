//! # emostat-cache
//!
//! Result cache implementations behind the [`emostat_core::ResultCache`]
//! trait: Redis-backed for deployments, an in-memory map for development
//! and tests, and an always-miss variant for running with caching off.
//!
//! The cache holds serialized top-N snapshots only. It is strictly
//! non-authoritative: disabling it changes latency, never results.

pub mod pool;
pub mod result_cache;

// Re-export pool types
pub use pool::{RedisPool, RedisPoolConfig, RedisPoolError, RedisResult};

// Re-export cache implementations
pub use result_cache::{DisabledCache, MemoryResultCache, RedisResultCache};
