//! Structured logging for tool invocations
//!
//! Produces one log line per call with timing and truncated arguments, e.g.
//! `[update_task_status] [34 ms] id=7, status="review"`.

use ::matrix_core::JsonObject;
use serde_json::Value;
use std::time::Instant;
use tracing::{info, warn};

/// Maximum length for parameter values before truncation
const MAX_PARAM_LENGTH: usize = 30;

/// Truncation suffix for long parameters
const TRUNCATION_SUFFIX: &str = "...";

/// Times one tool invocation and logs its outcome
pub struct ToolCallLog {
    tool: String,
    arguments: String,
    start: Instant,
}

impl ToolCallLog {
    pub fn start(tool: &str, arguments: Option<&JsonObject>) -> Self {
        Self {
            tool: tool.to_string(),
            arguments: arguments.map(format_arguments).unwrap_or_default(),
            start: Instant::now(),
        }
    }

    pub fn succeeded(self) {
        let elapsed = self.start.elapsed().as_millis() as u64;
        info!(
            tool = %self.tool,
            duration_ms = elapsed,
            "[{}] [{} ms] {}",
            self.tool,
            elapsed,
            self.arguments
        );
    }

    pub fn failed(self, message: &str) {
        let elapsed = self.start.elapsed().as_millis() as u64;
        warn!(
            tool = %self.tool,
            duration_ms = elapsed,
            error = %message,
            "[{}] [{} ms] {} - failed",
            self.tool,
            elapsed,
            self.arguments
        );
    }
}

/// Render arguments as `key=value` pairs in the order they were sent
pub fn format_arguments(arguments: &JsonObject) -> String {
    arguments
        .iter()
        .map(|(key, value)| format!("{key}={}", format_value(value)))
        .collect::<Vec<_>>()
        .join(", ")
}

fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => format!("\"{}\"", truncate(s)),
        other => truncate(&other.to_string()),
    }
}

fn truncate(value: &str) -> String {
    if value.chars().count() <= MAX_PARAM_LENGTH {
        return value.to_string();
    }
    let kept: String = value.chars().take(MAX_PARAM_LENGTH).collect();
    format!("{kept}{TRUNCATION_SUFFIX}")
}
