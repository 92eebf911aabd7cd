//! Mock implementations and test utilities for the Matrix MCP server
//!
//! This crate provides testing infrastructure including:
//! - A recording mock of the upstream Matrix HTTP API
//! - Realistic test data generators
//! - Fixtures and fluent builders for upstream payloads
//! - Custom assertion helpers for tool results

pub mod assertions;
pub mod builders;
pub mod fixtures;
pub mod generators;
pub mod upstream;

pub use assertions::*;
pub use builders::*;
pub use fixtures::*;
pub use generators::*;
pub use upstream::{MockMatrixApi, MockResponse, RecordedRequest};
