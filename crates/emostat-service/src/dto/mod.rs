//! Data transfer objects
//!
//! Shapes handed to the command/presentation layer.

mod stats;

pub use stats::StatsReport;
