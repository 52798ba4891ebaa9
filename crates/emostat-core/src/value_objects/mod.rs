//! Value objects - immutable types identified by their value

mod period;
mod snowflake;
mod uid;

pub use period::{Period, Periods};
pub use snowflake::{Snowflake, SnowflakeParseError};
pub use uid::EmojiUid;
