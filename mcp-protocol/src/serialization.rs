//! Serialization utilities for MCP protocol
//!
//! Converts upstream JSON and adapter errors into the single-content-item
//! tool result shape.

use ::matrix_core::{MatrixError, OperationDescriptor};
use rmcp::model::{CallToolResult, Content, Tool};
use serde_json::Value;
use std::sync::Arc;

/// Render an upstream JSON body as a pretty-printed success result
pub fn success_result(body: &Value) -> CallToolResult {
    CallToolResult::success(vec![Content::text(render_json(body))])
}

/// Render an adapter error as an error-flagged result.
///
/// Unknown tools keep their bare message; everything else is prefixed with
/// `Error: `.
pub fn error_result(error: &MatrixError) -> CallToolResult {
    let text = match error {
        MatrixError::UnknownTool(_) => error.to_string(),
        other => format!("Error: {other}"),
    };
    CallToolResult::error(vec![Content::text(text)])
}

/// Pretty-print JSON with two-space indentation
pub fn render_json(body: &Value) -> String {
    serde_json::to_string_pretty(body).unwrap_or_else(|_| body.to_string())
}

/// Convert a catalog entry into the tool advertised to MCP clients
pub fn tool_for(descriptor: &OperationDescriptor) -> Tool {
    Tool::new(
        descriptor.name,
        descriptor.description,
        Arc::new(descriptor.input_schema()),
    )
}
