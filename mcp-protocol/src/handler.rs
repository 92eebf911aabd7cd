//! Matrix Tool Handler
//!
//! Bridges MCP tool calls and the Matrix API: looks the tool up in the
//! catalog, decodes its arguments, issues the single upstream request and
//! normalizes the outcome into a tool result. No error escapes
//! [`MatrixToolHandler::call_tool`]; every failure becomes an error-flagged
//! result.

use crate::client::MatrixApi;
use crate::request_logger::ToolCallLog;
use crate::serialization::{error_result, success_result, tool_for};
use ::matrix_core::{operations, JsonObject, Operation, Result};
use rmcp::model::{CallToolResult, Tool};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info_span, Instrument};

/// MCP tool handler backed by a [`MatrixApi`]
pub struct MatrixToolHandler<A> {
    api: Arc<A>,
}

impl<A> Clone for MatrixToolHandler<A> {
    fn clone(&self) -> Self {
        Self {
            api: Arc::clone(&self.api),
        }
    }
}

impl<A> MatrixToolHandler<A> {
    /// Create new handler
    pub fn new(api: Arc<A>) -> Self {
        Self { api }
    }

    /// Get a clone of the API Arc
    pub fn api(&self) -> Arc<A> {
        self.api.clone()
    }

    /// Every catalog operation as an MCP tool, in catalog order
    pub fn list_tools(&self) -> Vec<Tool> {
        operations().iter().map(tool_for).collect()
    }
}

impl<A: MatrixApi> MatrixToolHandler<A> {
    /// Decode and execute one invocation, returning the upstream JSON body
    pub async fn invoke(&self, name: &str, arguments: Option<JsonObject>) -> Result<Value> {
        let operation = Operation::decode(name, arguments)?;
        let request = operation.to_request();
        debug!(
            tool = operation.name(),
            method = %request.method,
            path = %request.path,
            "Dispatching tool call"
        );
        self.api.execute(request).await
    }

    /// Execute one tool call and normalize the outcome
    pub async fn call_tool(&self, name: &str, arguments: Option<JsonObject>) -> CallToolResult {
        let log = ToolCallLog::start(name, arguments.as_ref());
        let span = info_span!("mcp_function", function = %name);

        match self.invoke(name, arguments).instrument(span).await {
            Ok(body) => {
                log.succeeded();
                success_result(&body)
            }
            Err(error) => {
                log.failed(&error.to_string());
                error_result(&error)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ::matrix_core::{ApiRequest, HttpMethod, MatrixError};
    use async_trait::async_trait;
    use mockall::{mock, predicate::eq};
    use rmcp::model::RawContent;
    use serde_json::json;

    mock! {
        pub Api {}

        #[async_trait]
        impl MatrixApi for Api {
            async fn execute(&self, request: ApiRequest) -> Result<Value>;
        }
    }

    fn text_of(result: &CallToolResult) -> String {
        match &result.content[0].raw {
            RawContent::Text(text_content) => text_content.text.clone(),
            _ => panic!("expected text content"),
        }
    }

    fn args(value: Value) -> Option<JsonObject> {
        value.as_object().cloned()
    }

    #[tokio::test]
    async fn test_success_is_pretty_printed() {
        let mut api = MockApi::new();
        api.expect_execute()
            .with(eq(ApiRequest::get("/api/task/42")))
            .times(1)
            .returning(|_| Ok(json!({"id": 42, "title": "Ship it"})));

        let handler = MatrixToolHandler::new(Arc::new(api));
        let result = handler.call_tool("get_task", args(json!({"id": 42}))).await;

        assert_eq!(result.is_error, Some(false));
        assert_eq!(
            text_of(&result),
            serde_json::to_string_pretty(&json!({"id": 42, "title": "Ship it"})).unwrap()
        );
    }

    #[tokio::test]
    async fn test_unknown_tool_never_reaches_api() {
        let mut api = MockApi::new();
        api.expect_execute().times(0);

        let handler = MatrixToolHandler::new(Arc::new(api));
        let result = handler.call_tool("delete_task", args(json!({"id": 1}))).await;

        assert_eq!(result.is_error, Some(true));
        assert_eq!(text_of(&result), "Unknown tool: delete_task");
    }

    #[tokio::test]
    async fn test_malformed_arguments_never_reach_api() {
        let mut api = MockApi::new();
        api.expect_execute().times(0);

        let handler = MatrixToolHandler::new(Arc::new(api));
        let result = handler.call_tool("update_task_status", args(json!({"id": 7}))).await;

        assert_eq!(result.is_error, Some(true));
        let text = text_of(&result);
        assert!(text.starts_with("Error: Malformed arguments for update_task_status"));
        assert!(text.contains("status"));
    }

    #[tokio::test]
    async fn test_upstream_failure_is_error_result() {
        let mut api = MockApi::new();
        api.expect_execute()
            .times(1)
            .returning(|_| Err(MatrixError::upstream(404, r#"{"error":"not found"}"#)));

        let handler = MatrixToolHandler::new(Arc::new(api));
        let result = handler.call_tool("get_task", args(json!({"id": 999}))).await;

        assert_eq!(result.is_error, Some(true));
        let text = text_of(&result);
        assert!(text.contains("404"));
        assert!(text.contains(r#"{"error":"not found"}"#));
    }

    #[tokio::test]
    async fn test_transport_failure_is_error_result() {
        let mut api = MockApi::new();
        api.expect_execute()
            .times(1)
            .returning(|_| Err(MatrixError::Transport("connection refused".to_string())));

        let handler = MatrixToolHandler::new(Arc::new(api));
        let result = handler.call_tool("list_tasks", None).await;

        assert_eq!(result.is_error, Some(true));
        assert_eq!(text_of(&result), "Error: connection refused");
    }

    #[tokio::test]
    async fn test_invoke_builds_patch_request() {
        let mut api = MockApi::new();
        api.expect_execute()
            .withf(|request| {
                request.method == HttpMethod::Patch
                    && request.path == "/api/task/7"
                    && request.body == Some(json!({"status": "review"}))
            })
            .times(1)
            .returning(|_| Ok(json!({"ok": true})));

        let handler = MatrixToolHandler::new(Arc::new(api));
        let body = handler
            .invoke("update_task_status", args(json!({"id": 7, "status": "review"})))
            .await
            .unwrap();
        assert_eq!(body, json!({"ok": true}));
    }

    #[test]
    fn test_list_tools_matches_catalog() {
        let handler = MatrixToolHandler::new(Arc::new(MockApi::new()));
        let names: Vec<String> = handler
            .list_tools()
            .iter()
            .map(|tool| tool.name.to_string())
            .collect();
        assert_eq!(
            names,
            vec![
                "list_tasks",
                "get_task",
                "update_task_status",
                "post_message",
                "get_messages",
                "add_task_note"
            ]
        );
    }
}
