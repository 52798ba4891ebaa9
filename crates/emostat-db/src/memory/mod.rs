//! In-process store backend
//!
//! Same trait semantics as the PostgreSQL backend, held in concurrent
//! maps. Selected via `BACKEND=memory`; used for development and tests.

mod counter;
mod settings;

pub use counter::MemoryCounterStore;
pub use settings::MemoryCommunityConfigStore;
