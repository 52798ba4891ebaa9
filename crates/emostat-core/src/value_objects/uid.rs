//! Emoji UID - opaque string key an emoji is stored under
//!
//! The payload format (tag byte + base64 identity + `:` + short name)
//! is produced and parsed by [`crate::entities::Emoji`]; this newtype
//! only guards against mixing UIDs up with other strings at the store
//! seams.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Deterministic, reversible string encoding of an emoji identity
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmojiUid(String);

impl EmojiUid {
    /// Wrap a raw UID string.
    ///
    /// No validation happens here; a malformed UID surfaces as a decode
    /// failure when it is turned back into an emoji.
    pub fn new(uid: impl Into<String>) -> Self {
        Self(uid.into())
    }

    /// The raw key string
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume into the raw key string
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for EmojiUid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for EmojiUid {
    fn from(uid: String) -> Self {
        Self(uid)
    }
}

impl AsRef<str> for EmojiUid {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
