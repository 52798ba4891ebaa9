//! Test fixtures and data generators
//!
//! Unique identities so tests sharing a store never collide.

use std::sync::atomic::{AtomicI64, Ordering};

use emostat_core::{EventSource, Snowflake};

/// Counter for unique test data
static COUNTER: AtomicI64 = AtomicI64::new(1);

/// Get a unique snowflake for test data (never zero)
pub fn unique_id() -> Snowflake {
    Snowflake::new(COUNTER.fetch_add(1, Ordering::SeqCst))
}

/// A community plus one of its members, with fresh message ids on demand
pub struct Scope {
    pub community_id: Snowflake,
    pub user_id: Snowflake,
}

impl Scope {
    pub fn unique() -> Self {
        Self {
            community_id: unique_id(),
            user_id: unique_id(),
        }
    }

    /// A message event source with a fresh message id
    pub fn message(&self) -> EventSource {
        EventSource::message(self.community_id, unique_id(), self.user_id)
    }

    /// A reaction event source against a given message
    pub fn reaction_on(&self, message_id: Snowflake) -> EventSource {
        EventSource::reaction(self.community_id, message_id, self.user_id)
    }
}
