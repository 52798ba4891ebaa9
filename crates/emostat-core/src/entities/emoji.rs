//! Emoji entity and the UID codec
//!
//! An emoji is either a platform-wide unicode emoji (identified by its
//! canonical short-name) or a community-uploaded custom emoji
//! (identified by a numeric id; custom names are NOT globally unique).
//!
//! The UID codec turns an emoji into a compact, reversible store key:
//! a one-character type tag, a base64 identity payload, and the display
//! name, joined by `:`. Unicode payloads are the UTF-16BE bytes of the
//! emoji's code sequence; custom payloads are the 8-byte little-endian
//! numeric id.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

use crate::error::DomainError;
use crate::value_objects::EmojiUid;

/// Type tag for unicode emoji UIDs
const TAG_UNICODE: char = 'u';
/// Type tag for custom emoji UIDs
const TAG_CUSTOM: char = 'c';

/// An emoji as observed in a message or reaction
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Emoji {
    /// Standard unicode emoji, identified by canonical short-name
    Unicode { name: String },
    /// Community-uploaded emoji, identified by its platform id
    Custom { name: String, id: u64 },
}

impl Emoji {
    /// Create a unicode emoji from its canonical short-name
    pub fn unicode(name: impl Into<String>) -> Self {
        Self::Unicode { name: name.into() }
    }

    /// Create a custom emoji from its display name and platform id
    pub fn custom(name: impl Into<String>, id: u64) -> Self {
        Self::Custom {
            name: name.into(),
            id,
        }
    }

    /// Display name (short-name for unicode, upload name for custom)
    pub fn name(&self) -> &str {
        match self {
            Self::Unicode { name } | Self::Custom { name, .. } => name,
        }
    }

    /// Rendered glyph for unicode emoji, `None` for custom emoji
    /// (custom emoji are rendered by the platform from their id)
    pub fn glyph(&self) -> Option<&'static str> {
        match self {
            Self::Unicode { name } => emojis::get_by_shortcode(name).map(emojis::Emoji::as_str),
            Self::Custom { .. } => None,
        }
    }

    /// Encode into the store key.
    ///
    /// Deterministic: equal emoji always produce byte-identical UIDs,
    /// which is required because UIDs are store keys, not display values.
    pub fn uid(&self) -> Result<EmojiUid, DomainError> {
        match self {
            Self::Unicode { name } => {
                let glyph = emojis::get_by_shortcode(name)
                    .ok_or_else(|| DomainError::UnknownEmoji(name.clone()))?;
                let utf16be: Vec<u8> = glyph
                    .as_str()
                    .encode_utf16()
                    .flat_map(u16::to_be_bytes)
                    .collect();
                Ok(EmojiUid::new(format!(
                    "{TAG_UNICODE}{}:{name}",
                    BASE64.encode(utf16be)
                )))
            }
            Self::Custom { name, id } => Ok(EmojiUid::new(format!(
                "{TAG_CUSTOM}{}:{name}",
                BASE64.encode(id.to_le_bytes())
            ))),
        }
    }

    /// Decode a store key back into an emoji.
    ///
    /// Returns `DomainError::Decode` on any malformed input: unknown tag,
    /// missing delimiter, payload that is not an 8-byte id, or a unicode
    /// name absent from the short-name table. Never panics; callers log
    /// and skip bad rows.
    pub fn from_uid(uid: &EmojiUid) -> Result<Self, DomainError> {
        let raw = uid.as_str();
        let mut chars = raw.chars();
        let tag = chars.next().ok_or_else(|| DomainError::decode(raw))?;
        let rest = chars.as_str();

        let (payload, name) = rest.split_once(':').ok_or_else(|| DomainError::decode(raw))?;
        if name.is_empty() || name.contains(':') {
            return Err(DomainError::decode(raw));
        }

        match tag {
            TAG_UNICODE => {
                // The payload is redundant with the name: the short-name
                // table is authoritative, so an unknown name fails the
                // decode even if the payload looks plausible.
                if emojis::get_by_shortcode(name).is_none() {
                    return Err(DomainError::decode(raw));
                }
                Ok(Self::unicode(name))
            }
            TAG_CUSTOM => {
                let bytes = BASE64
                    .decode(payload)
                    .map_err(|_| DomainError::decode(raw))?;
                let id_bytes: [u8; 8] =
                    bytes.try_into().map_err(|_| DomainError::decode(raw))?;
                Ok(Self::custom(name, u64::from_le_bytes(id_bytes)))
            }
            _ => Err(DomainError::decode(raw)),
        }
    }
}

// Equality is tag + identity: name for unicode, numeric id for custom.
// Custom names are not globally unique, so they do not participate.
impl PartialEq for Emoji {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Unicode { name: a }, Self::Unicode { name: b }) => a == b,
            (Self::Custom { id: a, .. }, Self::Custom { id: b, .. }) => a == b,
            _ => false,
        }
    }
}

impl Eq for Emoji {}

impl Hash for Emoji {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Self::Unicode { name } => {
                state.write_u8(0);
                name.hash(state);
            }
            Self::Custom { id, .. } => {
                state.write_u8(1);
                id.hash(state);
            }
        }
    }
}

/// An emoji occurrence with multiplicity, as extracted from one message
/// or reaction event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmojiOccurrence {
    pub emoji: Emoji,
    pub count: i64,
}

impl EmojiOccurrence {
    /// Create an occurrence; multiplicity is clamped to at least 1
    pub fn new(emoji: Emoji, count: i64) -> Self {
        Self {
            emoji,
            count: count.max(1),
        }
    }

    /// Single unicode emoji occurrence
    pub fn unicode(name: impl Into<String>) -> Self {
        Self::new(Emoji::unicode(name), 1)
    }

    /// Single custom emoji occurrence
    pub fn custom(name: impl Into<String>, id: u64) -> Self {
        Self::new(Emoji::custom(name, id), 1)
    }
}
