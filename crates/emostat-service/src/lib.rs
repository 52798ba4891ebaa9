//! # emostat-service
//!
//! Application layer: the event-facing ingest service, the query-facing
//! stats service, and the bootstrap code that wires a [`ServiceContext`]
//! from configuration.

pub mod bootstrap;
pub mod dto;
pub mod services;

pub use bootstrap::{build_context, BootstrapError};
pub use services::{
    IngestService, ServiceContext, ServiceContextBuilder, ServiceError, ServiceResult,
    StatsService,
};
