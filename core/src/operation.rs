//! Typed operations and the HTTP requests they translate to.

use crate::catalog::{find_operation, OperationDescriptor};
use crate::error::{MatrixError, Result};
use crate::models::{ApiRequest, ArgValue, HttpMethod};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use url::form_urlencoded;

/// Argument bag as delivered by an MCP tool call
pub type JsonObject = Map<String, Value>;

/// Filters for `list_tasks`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ListTasksParams {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub assignee: Option<String>,
}

/// Parameters for `get_task`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GetTaskParams {
    pub id: ArgValue,
}

/// Parameters for `update_task_status`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UpdateTaskStatusParams {
    pub id: ArgValue,
    pub status: String,
    #[serde(default)]
    pub result: Option<String>,
}

/// Parameters for `post_message`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PostMessageParams {
    pub from: String,
    pub text: String,
}

/// Parameters for `get_messages`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct GetMessagesParams {
    #[serde(default)]
    pub since: Option<ArgValue>,
}

/// Parameters for `add_task_note`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AddTaskNoteParams {
    pub id: ArgValue,
    pub from: String,
    pub text: String,
}

/// A fully decoded invocation, one variant per catalog entry
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    ListTasks(ListTasksParams),
    GetTask(GetTaskParams),
    UpdateTaskStatus(UpdateTaskStatusParams),
    PostMessage(PostMessageParams),
    GetMessages(GetMessagesParams),
    AddTaskNote(AddTaskNoteParams),
}

#[derive(Serialize)]
struct StatusBody<'a> {
    status: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<&'a str>,
}

#[derive(Serialize)]
struct MessageBody<'a> {
    from: &'a str,
    text: &'a str,
}

impl Operation {
    /// Look up `name` in the catalog and decode `arguments` for it.
    ///
    /// Unknown names yield [`MatrixError::UnknownTool`]; arguments that do not
    /// fit the operation's parameters yield [`MatrixError::MalformedArguments`].
    pub fn decode(name: &str, arguments: Option<JsonObject>) -> Result<Self> {
        let descriptor = find_operation(name).ok_or_else(|| MatrixError::unknown_tool(name))?;
        descriptor.decode(arguments.unwrap_or_default())
    }

    /// Catalog name of this operation
    pub fn name(&self) -> &'static str {
        match self {
            Operation::ListTasks(_) => "list_tasks",
            Operation::GetTask(_) => "get_task",
            Operation::UpdateTaskStatus(_) => "update_task_status",
            Operation::PostMessage(_) => "post_message",
            Operation::GetMessages(_) => "get_messages",
            Operation::AddTaskNote(_) => "add_task_note",
        }
    }

    /// Catalog entry describing this operation
    pub fn descriptor(&self) -> Option<&'static OperationDescriptor> {
        find_operation(self.name())
    }

    /// HTTP method used for this operation's request
    pub fn method(&self) -> HttpMethod {
        match self {
            Operation::ListTasks(_) | Operation::GetTask(_) | Operation::GetMessages(_) => {
                HttpMethod::Get
            }
            Operation::UpdateTaskStatus(_) => HttpMethod::Patch,
            Operation::PostMessage(_) | Operation::AddTaskNote(_) => HttpMethod::Post,
        }
    }

    /// Build the single upstream request for this invocation
    pub fn to_request(&self) -> ApiRequest {
        let method = self.method();
        match self {
            Operation::ListTasks(params) => {
                let mut query = form_urlencoded::Serializer::new(String::new());
                if let Some(status) = params.status.as_deref().filter(|s| !s.is_empty()) {
                    query.append_pair("status", status);
                }
                if let Some(assignee) = params.assignee.as_deref().filter(|s| !s.is_empty()) {
                    query.append_pair("assignee", assignee);
                }
                ApiRequest::get(with_query("/api/tasks", query.finish()))
            }
            Operation::GetTask(params) => ApiRequest::get(format!("/api/task/{}", params.id)),
            Operation::UpdateTaskStatus(params) => ApiRequest::with_body(
                method,
                format!("/api/task/{}", params.id),
                to_body(&StatusBody {
                    status: &params.status,
                    result: params.result.as_deref(),
                }),
            ),
            Operation::PostMessage(params) => ApiRequest::with_body(
                method,
                "/api/message",
                to_body(&MessageBody {
                    from: &params.from,
                    text: &params.text,
                }),
            ),
            Operation::GetMessages(params) => {
                let mut query = form_urlencoded::Serializer::new(String::new());
                if let Some(since) = params.since.as_ref().filter(|s| s.is_set()) {
                    query.append_pair("since", &since.to_string());
                }
                ApiRequest::get(with_query("/api/messages", query.finish()))
            }
            Operation::AddTaskNote(params) => ApiRequest::with_body(
                method,
                format!("/api/task/{}/note", params.id),
                to_body(&MessageBody {
                    from: &params.from,
                    text: &params.text,
                }),
            ),
        }
    }
}

fn with_query(path: &str, query: String) -> String {
    if query.is_empty() {
        path.to_string()
    } else {
        format!("{path}?{query}")
    }
}

fn to_body<T: Serialize>(body: &T) -> Value {
    // Bodies are plain string structs; serialization cannot fail
    serde_json::to_value(body).unwrap_or(Value::Null)
}

fn decode_as<T: for<'de> Deserialize<'de>>(arguments: JsonObject) -> serde_json::Result<T> {
    serde_json::from_value(Value::Object(arguments))
}

pub(crate) fn decode_list_tasks(arguments: JsonObject) -> serde_json::Result<Operation> {
    decode_as(arguments).map(Operation::ListTasks)
}

pub(crate) fn decode_get_task(arguments: JsonObject) -> serde_json::Result<Operation> {
    decode_as(arguments).map(Operation::GetTask)
}

pub(crate) fn decode_update_task_status(arguments: JsonObject) -> serde_json::Result<Operation> {
    decode_as(arguments).map(Operation::UpdateTaskStatus)
}

pub(crate) fn decode_post_message(arguments: JsonObject) -> serde_json::Result<Operation> {
    decode_as(arguments).map(Operation::PostMessage)
}

pub(crate) fn decode_get_messages(arguments: JsonObject) -> serde_json::Result<Operation> {
    decode_as(arguments).map(Operation::GetMessages)
}

pub(crate) fn decode_add_task_note(arguments: JsonObject) -> serde_json::Result<Operation> {
    decode_as(arguments).map(Operation::AddTaskNote)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::operations;
    use serde_json::json;

    fn args(value: Value) -> Option<JsonObject> {
        match value {
            Value::Object(map) => Some(map),
            _ => panic!("test arguments must be an object"),
        }
    }

    fn request(name: &str, value: Value) -> ApiRequest {
        Operation::decode(name, args(value)).unwrap().to_request()
    }

    #[test]
    fn test_list_tasks_without_filters() {
        let req = Operation::decode("list_tasks", None).unwrap().to_request();
        assert_eq!(req, ApiRequest::get("/api/tasks"));
    }

    #[test]
    fn test_list_tasks_query_encoding() {
        let req = request("list_tasks", json!({"status": "done", "assignee": "Hal 2"}));
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.path, "/api/tasks?status=done&assignee=Hal+2");
        assert!(req.body.is_none());

        let req = request("list_tasks", json!({"assignee": "a&b=c"}));
        assert_eq!(req.path, "/api/tasks?assignee=a%26b%3Dc");

        let req = request("list_tasks", json!({"status": ""}));
        assert_eq!(req.path, "/api/tasks");
    }

    #[test]
    fn test_get_task_path() {
        let req = request("get_task", json!({"id": 42}));
        assert_eq!(req, ApiRequest::get("/api/task/42"));

        // Identifiers are forwarded without numeric validation
        let req = request("get_task", json!({"id": "abc"}));
        assert_eq!(req.path, "/api/task/abc");
    }

    #[test]
    fn test_update_task_status_body() {
        let req = request("update_task_status", json!({"id": 7, "status": "review"}));
        assert_eq!(req.method, HttpMethod::Patch);
        assert_eq!(req.path, "/api/task/7");
        assert_eq!(req.body, Some(json!({"status": "review"})));
        assert_eq!(
            serde_json::to_string(req.body.as_ref().unwrap()).unwrap(),
            r#"{"status":"review"}"#
        );

        let req = request(
            "update_task_status",
            json!({"id": 7, "status": "done", "result": "shipped"}),
        );
        assert_eq!(
            serde_json::to_string(req.body.as_ref().unwrap()).unwrap(),
            r#"{"status":"done","result":"shipped"}"#
        );

        let req = request(
            "update_task_status",
            json!({"id": 7, "status": "done", "result": null}),
        );
        assert_eq!(req.body, Some(json!({"status": "done"})));
    }

    #[test]
    fn test_message_bodies() {
        let req = request("post_message", json!({"from": "Gemini", "text": "hello"}));
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.path, "/api/message");
        assert_eq!(req.body, Some(json!({"from": "Gemini", "text": "hello"})));

        let req = request(
            "add_task_note",
            json!({"id": 3, "from": "Hal 2", "text": "blocked on review"}),
        );
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.path, "/api/task/3/note");
        assert_eq!(
            req.body,
            Some(json!({"from": "Hal 2", "text": "blocked on review"}))
        );
    }

    #[test]
    fn test_get_messages_since() {
        assert_eq!(request("get_messages", json!({})).path, "/api/messages");
        assert_eq!(request("get_messages", json!({"since": 0})).path, "/api/messages");
        assert_eq!(
            request("get_messages", json!({"since": 1718000000000u64})).path,
            "/api/messages?since=1718000000000"
        );
    }

    #[test]
    fn test_unknown_tool() {
        let err = Operation::decode("drop_tables", None).unwrap_err();
        assert_eq!(err, MatrixError::unknown_tool("drop_tables"));
    }

    #[test]
    fn test_missing_required_argument() {
        let err = Operation::decode("get_task", None).unwrap_err();
        match err {
            MatrixError::MalformedArguments { tool, reason } => {
                assert_eq!(tool, "get_task");
                assert!(reason.contains("id"), "reason was: {reason}");
            }
            other => panic!("unexpected error: {other:?}"),
        }

        let err = Operation::decode("post_message", args(json!({"from": "x"}))).unwrap_err();
        assert!(err.is_caller_error());
    }

    #[test]
    fn test_wrongly_typed_argument() {
        let err = Operation::decode("post_message", args(json!({"from": "x", "text": 5})))
            .unwrap_err();
        assert!(matches!(err, MatrixError::MalformedArguments { .. }));
    }

    #[test]
    fn test_extra_arguments_are_ignored() {
        let req = request("get_task", json!({"id": 1, "verbose": true}));
        assert_eq!(req.path, "/api/task/1");
    }

    #[test]
    fn test_every_descriptor_round_trips_its_name() {
        let samples = json!({
            "id": 1, "status": "done", "from": "a", "text": "b"
        });
        for descriptor in operations() {
            let op = descriptor.decode(args(samples.clone()).unwrap()).unwrap();
            assert_eq!(op.name(), descriptor.name);
            assert_eq!(op.method(), descriptor.method);
            assert_eq!(op.to_request().method, descriptor.method);
            assert_eq!(op.descriptor().map(|d| d.name), Some(descriptor.name));
        }
    }
}
