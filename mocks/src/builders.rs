//! Builder pattern implementations for easy test data construction
//!
//! Provides fluent builders for:
//! - Upstream task payloads with sensible defaults
//! - Tool argument objects

use chrono::Utc;
use matrix_core::JsonObject;
use serde_json::{json, Value};

/// Builder for task payloads served by the mock upstream
pub struct TaskJsonBuilder {
    task: JsonObject,
}

impl Default for TaskJsonBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskJsonBuilder {
    /// Create new builder with default values
    pub fn new() -> Self {
        let mut task = JsonObject::new();
        task.insert("id".to_string(), json!(1));
        task.insert("title".to_string(), json!("Test Task"));
        task.insert("status".to_string(), json!("pending"));
        task.insert("assignee".to_string(), json!("test-agent"));
        task.insert("created_at".to_string(), json!(Utc::now().to_rfc3339()));
        Self { task }
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.task.insert("id".to_string(), json!(id));
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.task.insert("title".to_string(), json!(title.into()));
        self
    }

    /// Set status; `done` also stamps `completed_at`
    pub fn with_status(mut self, status: &str) -> Self {
        self.task.insert("status".to_string(), json!(status));
        if status == "done" && !self.task.contains_key("completed_at") {
            self.task
                .insert("completed_at".to_string(), json!(Utc::now().to_rfc3339()));
        }
        self
    }

    pub fn with_assignee(mut self, assignee: impl Into<String>) -> Self {
        self.task.insert("assignee".to_string(), json!(assignee.into()));
        self
    }

    pub fn with_result(mut self, result: impl Into<String>) -> Self {
        self.task.insert("result".to_string(), json!(result.into()));
        self
    }

    pub fn with_notes(mut self, notes: &[&str]) -> Self {
        self.task.insert("notes".to_string(), json!(notes));
        self
    }

    pub fn build(self) -> Value {
        Value::Object(self.task)
    }
}

/// Builder for tool call arguments
#[derive(Default)]
pub struct ArgsBuilder {
    args: JsonObject,
}

impl ArgsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add any JSON value under `key`
    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.args.insert(key.to_string(), value.into());
        self
    }

    pub fn build(self) -> JsonObject {
        self.args
    }
}
