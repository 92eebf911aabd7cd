//! Standard test fixtures for consistent testing
//!
//! Upstream payloads shaped like the Matrix API's tasks, messages and notes.
//! Tool results pass these through untouched, so tests compare against them
//! directly.

use chrono::Utc;
use serde_json::{json, Value};

/// A basic task with sensible defaults
pub fn sample_task(id: i64) -> Value {
    json!({
        "id": id,
        "title": format!("Test Task {id}"),
        "description": "A standard test task with default values",
        "status": "pending",
        "assignee": "Hal 2",
        "created_at": Utc::now().to_rfc3339(),
    })
}

/// Task with a specific status
pub fn sample_task_with_status(id: i64, status: &str) -> Value {
    let mut task = sample_task(id);
    task["status"] = json!(status);
    task
}

/// One task per documented status
pub fn tasks_in_all_statuses() -> Vec<Value> {
    matrix_core::documented_statuses()
        .enumerate()
        .map(|(i, status)| sample_task_with_status(i as i64 + 1, status))
        .collect()
}

/// Message as returned by the message bus
pub fn sample_message(id: i64, from: &str, text: &str) -> Value {
    json!({
        "id": id,
        "from": from,
        "text": text,
        "timestamp": Utc::now().timestamp_millis(),
    })
}

/// A short conversation between agents, oldest first
pub fn sample_conversation() -> Vec<Value> {
    vec![
        sample_message(1, "Hal 1", "Picking up task 7"),
        sample_message(2, "Hal 2", "Task 12 is ready for review"),
        sample_message(3, "Hal 1", "Task 7 shipped"),
    ]
}

/// Acknowledgement for an appended note
pub fn sample_note(task_id: i64, from: &str, text: &str) -> Value {
    json!({
        "task_id": task_id,
        "from": from,
        "text": text,
        "created_at": Utc::now().to_rfc3339(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_statuses_covered() {
        let tasks = tasks_in_all_statuses();
        assert_eq!(tasks.len(), matrix_core::documented_statuses().count());
        assert_eq!(tasks[0]["status"], "pending");
        assert_eq!(tasks[0]["id"], 1);
    }

    #[test]
    fn test_conversation_ordering() {
        let ids: Vec<i64> = sample_conversation()
            .iter()
            .filter_map(|m| m["id"].as_i64())
            .collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }
}
