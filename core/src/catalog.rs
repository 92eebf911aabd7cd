//! Static catalog of the Matrix operations exposed as MCP tools.
//!
//! Each entry pairs the advertised schema with the decoder that turns an
//! invocation's argument bag into a typed [`Operation`]. Dispatch looks names
//! up here instead of branching on them.

use crate::error::{MatrixError, Result};
use crate::models::HttpMethod;
use crate::operation::{self, JsonObject, Operation};
use serde_json::{json, Value};

const STATUS_VALUES: &str = "pending, in_progress, ready_to_deploy, review, done, failed, rejected";

/// JSON Schema type of a tool parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    String,
    Number,
}

impl ParamKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParamKind::String => "string",
            ParamKind::Number => "number",
        }
    }
}

/// One declared tool parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamSpec {
    pub name: &'static str,
    pub kind: ParamKind,
    pub required: bool,
    pub description: &'static str,
}

impl ParamSpec {
    const fn required(name: &'static str, kind: ParamKind, description: &'static str) -> Self {
        Self {
            name,
            kind,
            required: true,
            description,
        }
    }

    const fn optional(name: &'static str, kind: ParamKind, description: &'static str) -> Self {
        Self {
            name,
            kind,
            required: false,
            description,
        }
    }
}

/// Immutable description of one operation: what is advertised and how the
/// argument bag is decoded.
#[derive(Debug, Clone, Copy)]
pub struct OperationDescriptor {
    pub name: &'static str,
    pub description: &'static str,
    pub method: HttpMethod,
    pub params: &'static [ParamSpec],
    decode: fn(JsonObject) -> serde_json::Result<Operation>,
}

impl OperationDescriptor {
    /// Render the parameter list as an MCP `inputSchema` object
    pub fn input_schema(&self) -> JsonObject {
        let mut properties = JsonObject::new();
        for param in self.params {
            properties.insert(
                param.name.to_string(),
                json!({
                    "type": param.kind.as_str(),
                    "description": param.description,
                }),
            );
        }

        let mut schema = JsonObject::new();
        schema.insert("type".to_string(), json!("object"));
        schema.insert("properties".to_string(), Value::Object(properties));

        let required: Vec<&str> = self.required_params().collect();
        if !required.is_empty() {
            schema.insert("required".to_string(), json!(required));
        }
        schema
    }

    /// Names of the parameters the schema marks as required
    pub fn required_params(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.params.iter().filter(|p| p.required).map(|p| p.name)
    }

    /// Decode an argument bag into this operation's typed parameters
    pub fn decode(&self, arguments: JsonObject) -> Result<Operation> {
        (self.decode)(arguments).map_err(|e| MatrixError::malformed(self.name, e.to_string()))
    }
}

const ID_PARAM: ParamSpec = ParamSpec::required("id", ParamKind::Number, "Task ID");

static CATALOG: [OperationDescriptor; 6] = [
    OperationDescriptor {
        name: "list_tasks",
        description: "List Matrix tasks with optional filters by status or assignee",
        method: HttpMethod::Get,
        params: &[
            ParamSpec::optional(
                "status",
                ParamKind::String,
                "Filter by status: pending, in_progress, ready_to_deploy, review, done, failed, rejected",
            ),
            ParamSpec::optional(
                "assignee",
                ParamKind::String,
                "Filter by assignee name (e.g. 'Hal 2')",
            ),
        ],
        decode: operation::decode_list_tasks,
    },
    OperationDescriptor {
        name: "get_task",
        description: "Get full details of a Matrix task including its notes",
        method: HttpMethod::Get,
        params: &[ID_PARAM],
        decode: operation::decode_get_task,
    },
    OperationDescriptor {
        name: "update_task_status",
        description: "Update a Matrix task's status. Valid statuses: pending, in_progress, ready_to_deploy, review, done, failed, rejected",
        method: HttpMethod::Patch,
        params: &[
            ID_PARAM,
            ParamSpec::required("status", ParamKind::String, "New status value"),
            ParamSpec::optional(
                "result",
                ParamKind::String,
                "Optional summary of work done (recommended when marking ready_to_deploy or review)",
            ),
        ],
        decode: operation::decode_update_task_status,
    },
    OperationDescriptor {
        name: "post_message",
        description: "Post a chat message to the Matrix message bus",
        method: HttpMethod::Post,
        params: &[
            ParamSpec::required("from", ParamKind::String, "Sender display name (e.g. 'Gemini')"),
            ParamSpec::required("text", ParamKind::String, "Message text"),
        ],
        decode: operation::decode_post_message,
    },
    OperationDescriptor {
        name: "get_messages",
        description: "Get recent Matrix chat messages, optionally filtered by a since timestamp",
        method: HttpMethod::Get,
        params: &[ParamSpec::optional(
            "since",
            ParamKind::Number,
            "Unix millisecond timestamp — only return messages after this time",
        )],
        decode: operation::decode_get_messages,
    },
    OperationDescriptor {
        name: "add_task_note",
        description: "Add a note to an existing Matrix task",
        method: HttpMethod::Post,
        params: &[
            ID_PARAM,
            ParamSpec::required("from", ParamKind::String, "Author display name"),
            ParamSpec::required("text", ParamKind::String, "Note content"),
        ],
        decode: operation::decode_add_task_note,
    },
];

/// All operations, in advertisement order
pub fn operations() -> &'static [OperationDescriptor] {
    &CATALOG
}

/// Exact-match lookup of an operation by name
pub fn find_operation(name: &str) -> Option<&'static OperationDescriptor> {
    CATALOG.iter().find(|op| op.name == name)
}

/// Status values the Matrix API documents for tasks
pub fn documented_statuses() -> impl Iterator<Item = &'static str> {
    STATUS_VALUES.split(", ")
}
