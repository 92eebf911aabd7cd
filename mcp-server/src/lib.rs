//! MCP Server Library
//!
//! Configuration, telemetry and startup wiring for the `matrix-mcp` binary,
//! which exposes the Matrix task board and message bus to MCP clients over
//! stdio.

pub mod config;
pub mod setup;
pub mod telemetry;

pub use config::Config;
pub use setup::{create_client, create_handler, initialize_app};
pub use telemetry::init_telemetry;
