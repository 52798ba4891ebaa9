//! Store traits (ports) - define the interface for persistence

mod stores;

pub use stores::{CommunityConfigStore, CounterStore, ResultCache, StoreResult};
