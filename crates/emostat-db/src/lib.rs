//! # emostat-db
//!
//! Persistence layer implementing the store traits from `emostat-core`.
//!
//! ## Overview
//!
//! Two interchangeable backends, selected at startup:
//!
//! - PostgreSQL via SQLx: counter table with atomic upsert arithmetic,
//!   raw occurrence log for deletion-by-source, settings table
//! - In-process maps (dashmap) with the same trait semantics, used for
//!   development and tests
//!
//! ## Usage
//!
//! ```rust,ignore
//! use emostat_db::pool::{create_pool, DatabaseConfig};
//! use emostat_db::{PgCounterStore, PgCommunityConfigStore};
//! use emostat_core::CounterStore;
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = DatabaseConfig::from_env();
//!     let pool = create_pool(&config).await?;
//!     let counters = PgCounterStore::new(pool);
//!
//!     // Use the store...
//!     Ok(())
//! }
//! ```

pub mod memory;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use memory::{MemoryCommunityConfigStore, MemoryCounterStore};
pub use pool::{create_pool, create_pool_from_env, DatabaseConfig, PgPool};
pub use repositories::{PgCommunityConfigStore, PgCounterStore};
