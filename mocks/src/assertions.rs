//! Custom assertion helpers for testing
//!
//! Provides specialized assertions for:
//! - Tool results (success text, error text)
//! - Requests recorded by the mock upstream

use crate::upstream::RecordedRequest;
use matrix_core::API_KEY_HEADER;
use rmcp::model::{CallToolResult, RawContent};
use serde_json::Value;

/// Text of the single content item of a tool result
pub fn result_text(result: &CallToolResult) -> String {
    assert_eq!(
        result.content.len(),
        1,
        "Expected exactly one content item, got {}",
        result.content.len()
    );
    match &result.content[0].raw {
        RawContent::Text(text_content) => text_content.text.clone(),
        other => panic!("Expected text content, got {other:?}"),
    }
}

/// Assert a successful result and return its text parsed as JSON
pub fn assert_tool_success(result: &CallToolResult) -> Value {
    let text = result_text(result);
    assert_ne!(
        result.is_error,
        Some(true),
        "Expected success but got error: {text}"
    );
    serde_json::from_str(&text)
        .unwrap_or_else(|e| panic!("Success text is not JSON ({e}): {text}"))
}

/// Assert an error-flagged result and return its text
pub fn assert_tool_error(result: &CallToolResult) -> String {
    let text = result_text(result);
    assert_eq!(
        result.is_error,
        Some(true),
        "Expected error but got success: {text}"
    );
    text
}

/// Assert an error result carrying the given upstream status
pub fn assert_upstream_error(result: &CallToolResult, status: u16) -> String {
    let text = assert_tool_error(result);
    let prefix = format!("Error: Matrix API error {status}: ");
    assert!(
        text.starts_with(&prefix),
        "Expected upstream {status} error, got: {text}"
    );
    text
}

/// Assert the request carried the API key and JSON content type
pub fn assert_authenticated_json(request: &RecordedRequest, api_key: &str) {
    assert_eq!(
        request.header(API_KEY_HEADER),
        Some(api_key),
        "Missing or wrong {API_KEY_HEADER} on {} {}",
        request.method,
        request.path
    );
    assert_eq!(
        request.header("content-type"),
        Some("application/json"),
        "Wrong content type on {} {}",
        request.method,
        request.path
    );
}

/// Assert the request body is exactly this JSON text
pub fn assert_body_text(request: &RecordedRequest, expected: &str) {
    assert_eq!(
        request.raw_body, expected,
        "Unexpected body on {} {}",
        request.method, request.path
    );
}
