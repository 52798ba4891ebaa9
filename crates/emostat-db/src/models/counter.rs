//! Counter table model

use sqlx::FromRow;

/// One `(emoji_uid, hits)` row from the counter table, as returned by
/// the top-N query
#[derive(Debug, Clone, FromRow)]
pub struct CounterRowModel {
    pub emoji_uid: String,
    pub hits: i64,
}
