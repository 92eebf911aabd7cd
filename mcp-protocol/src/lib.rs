//! MCP Protocol Implementation
//!
//! This crate connects the Matrix operation catalog to MCP clients.
//!
//! # Overview
//!
//! - [`client`] - `apiFetch`-style HTTP client for the upstream Matrix API
//! - [`handler`] - Tool dispatch and result normalization
//! - [`rmcp_handler`] - RMCP `ServerHandler` implementation
//! - [`serialization`] - Tool schemas and result rendering
//! - [`request_logger`] - One-line structured logging per tool call
//!
//! # Usage
//!
//! ```no_run
//! use matrix_core::UpstreamSettings;
//! use mcp_protocol::{MatrixClient, MatrixToolHandler};
//! use rmcp::{transport::stdio, ServiceExt};
//! use std::sync::Arc;
//!
//! async fn start_server() -> Result<(), Box<dyn std::error::Error>> {
//!     let settings = UpstreamSettings::new("https://matrix.loot42.com", "api-key");
//!     let handler = MatrixToolHandler::new(Arc::new(MatrixClient::new(settings)?));
//!     let service = handler.serve(stdio()).await?;
//!     service.waiting().await?;
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod handler;
pub mod request_logger;
pub mod rmcp_handler;
pub mod serialization;

// Re-export key types for easier usage
pub use client::{FetchOptions, MatrixApi, MatrixClient};
pub use handler::MatrixToolHandler;
pub use rmcp_handler::SERVER_NAME;
pub use serialization::*;

// Re-export core types for external consumers
pub use matrix_core::{
    ApiRequest, HttpMethod, JsonObject, MatrixError, Operation, UpstreamSettings,
};
