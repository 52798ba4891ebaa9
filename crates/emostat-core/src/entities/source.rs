//! Event source - where an emoji occurrence came from
//!
//! A source pins an occurrence to one (community, message, user) triple
//! plus whether it arrived as a reaction or inside the message body.
//! Its UID is write-only: it is never decoded, only used as the lookup
//! key when a deleted message's raw occurrences are bulk-removed.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde::{Deserialize, Serialize};

use crate::value_objects::Snowflake;

/// Identifies the origin of one or more emoji occurrences
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EventSource {
    pub community_id: Snowflake,
    pub message_id: Snowflake,
    pub user_id: Snowflake,
    /// True when the occurrence is a reaction, false for message body text
    pub is_reaction: bool,
}

impl EventSource {
    /// Source for emoji found in a message body
    pub fn message(community_id: Snowflake, message_id: Snowflake, user_id: Snowflake) -> Self {
        Self {
            community_id,
            message_id,
            user_id,
            is_reaction: false,
        }
    }

    /// Source for a reaction event
    pub fn reaction(community_id: Snowflake, message_id: Snowflake, user_id: Snowflake) -> Self {
        Self {
            community_id,
            message_id,
            user_id,
            is_reaction: true,
        }
    }

    /// Deterministic store key for this source.
    ///
    /// Packs `(is_reaction: 1 byte, community_id, user_id, message_id:
    /// little-endian u64 x 3)` and base64-encodes the 25-byte blob.
    /// Equal tuples always produce the same UID.
    pub fn uid(&self) -> String {
        let mut blob = [0u8; 25];
        blob[0] = u8::from(self.is_reaction);
        blob[1..9].copy_from_slice(&self.community_id.to_le_bytes());
        blob[9..17].copy_from_slice(&self.user_id.to_le_bytes());
        blob[17..25].copy_from_slice(&self.message_id.to_le_bytes());
        BASE64.encode(blob)
    }
}
