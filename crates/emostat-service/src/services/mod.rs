//! Service layer
//!
//! Services borrow the [`ServiceContext`] and contain the use-case
//! logic; all shared state lives behind the store traits in the context.

pub mod context;
pub mod error;
pub mod ingest;
pub mod stats;

pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use ingest::IngestService;
pub use stats::StatsService;
