//! Random test data generators using the fake crate
//!
//! Provides realistic random data including:
//! - Agent names from a realistic pool
//! - Task titles and message text
//! - Whole task and message payloads

use chrono::Utc;
use fake::faker::lorem::en::{Paragraph, Sentence};
use fake::Fake;
use rand::seq::SliceRandom;
use serde_json::{json, Value};

const AGENTS: &[&str] = &[
    "Hal 1",
    "Hal 2",
    "Hal 3",
    "deploy-bot",
    "review-agent",
    "qa-runner",
];

/// Generate a realistic agent name
pub fn generate_agent_name() -> String {
    AGENTS
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or("Hal 1")
        .to_string()
}

/// Generate one of the documented task statuses
pub fn generate_status() -> String {
    let statuses: Vec<&str> = matrix_core::documented_statuses().collect();
    statuses
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or("pending")
        .to_string()
}

pub fn generate_task_title() -> String {
    Sentence(3..8).fake()
}

pub fn generate_message_text() -> String {
    Paragraph(1..3).fake()
}

/// Generate a random task payload
pub fn generate_random_task() -> Value {
    let id: u32 = (1..99999).fake();
    json!({
        "id": id,
        "title": generate_task_title(),
        "status": generate_status(),
        "assignee": generate_agent_name(),
        "created_at": Utc::now().to_rfc3339(),
    })
}

/// Generate `count` tasks with unique sequential ids
pub fn generate_tasks(count: usize) -> Vec<Value> {
    (1..=count)
        .map(|i| {
            let mut task = generate_random_task();
            task["id"] = json!(i);
            task
        })
        .collect()
}

/// Generate a random message payload
pub fn generate_message(id: i64) -> Value {
    json!({
        "id": id,
        "from": generate_agent_name(),
        "text": generate_message_text(),
        "timestamp": Utc::now().timestamp_millis(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_status_is_documented() {
        for _ in 0..20 {
            let status = generate_status();
            assert!(matrix_core::documented_statuses().any(|s| s == status));
        }
    }

    #[test]
    fn test_generate_tasks_sequential_ids() {
        let tasks = generate_tasks(5);
        let ids: Vec<u64> = tasks.iter().filter_map(|t| t["id"].as_u64()).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
        assert!(tasks.iter().all(|t| !t["title"].as_str().unwrap_or("").is_empty()));
    }
}
