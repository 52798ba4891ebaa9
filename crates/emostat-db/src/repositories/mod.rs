//! PostgreSQL store implementations

mod counter;
mod error;
mod settings;

pub use counter::PgCounterStore;
pub use error::map_db_error;
pub use settings::PgCommunityConfigStore;
