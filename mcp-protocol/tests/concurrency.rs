//! Concurrent tool calls
//!
//! Calls share one handler and one HTTP client; each gets its own response.

use futures_util::future::join_all;
use mcp_protocol::*;
use mocks::*;
use serde_json::json;
use std::sync::Arc;
use std::time::{Duration, Instant};

#[tokio::test]
async fn test_concurrent_calls_are_independent() {
    let upstream = MockMatrixApi::start().await.unwrap();
    let tasks = generate_tasks(10);
    for task in &tasks {
        upstream.respond(
            "GET",
            &format!("/api/task/{}", task["id"]),
            MockResponse::json(200, task.clone()).delayed(Duration::from_millis(100)),
        );
    }
    let client = MatrixClient::new(UpstreamSettings::new(upstream.base_url(), "k")).unwrap();
    let handler = MatrixToolHandler::new(Arc::new(client));

    let start = Instant::now();
    let calls = (1..=10).map(|id| {
        let handler = handler.clone();
        async move {
            let result = handler
                .call_tool("get_task", Some(ArgsBuilder::new().with("id", id).build()))
                .await;
            assert_tool_success(&result)
        }
    });
    let results = join_all(calls).await;
    let elapsed = start.elapsed();

    // Each call gets exactly its own task back
    assert_eq!(results, tasks);
    assert_eq!(upstream.request_count(), 10);
    // Sequential dispatch would take at least a second
    assert!(elapsed < Duration::from_millis(900), "calls were serialized: {elapsed:?}");
}

#[tokio::test]
async fn test_failure_does_not_affect_other_calls() {
    let upstream = MockMatrixApi::start().await.unwrap();
    upstream.respond_json("GET", "/api/messages", 200, json!(sample_conversation()));
    let client = MatrixClient::new(UpstreamSettings::new(upstream.base_url(), "k")).unwrap();
    let handler = MatrixToolHandler::new(Arc::new(client));

    let (missing, messages, unknown) = tokio::join!(
        handler.call_tool("get_task", json!({"id": 404}).as_object().cloned()),
        handler.call_tool("get_messages", None),
        handler.call_tool("nope", None),
    );

    assert_upstream_error(&missing, 404);
    assert_eq!(assert_tool_success(&messages).as_array().map(Vec::len), Some(3));
    assert_eq!(assert_tool_error(&unknown), "Unknown tool: nope");
}
