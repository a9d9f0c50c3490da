//! Integration test utilities for the social server
//!
//! Helpers for running end-to-end tests against the REST API
//! backed by a real PostgreSQL database.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
