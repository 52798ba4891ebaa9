//! Integration test utilities for the emoji stats backend
//!
//! This crate provides helpers for wiring a full service context on the
//! in-process backends and generating non-colliding test identities.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
