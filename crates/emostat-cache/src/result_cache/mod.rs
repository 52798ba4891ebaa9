//! Result cache implementations

mod disabled;
mod memory;
mod redis;

pub use disabled::DisabledCache;
pub use memory::MemoryResultCache;
pub use redis::RedisResultCache;
