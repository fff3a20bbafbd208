//! Common test utilities for REST API testing.
//!
//! - [`fixtures`] - Clinical rows and a seeded in-memory backend
//! - [`harness`] - Test server construction

pub mod fixtures;
pub mod harness;

pub use fixtures::*;
pub use harness::*;
