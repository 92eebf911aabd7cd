//! Matrix Core Library
//!
//! This crate holds the protocol-independent half of the Matrix MCP adapter:
//! which operations exist, how their arguments are decoded, and which HTTP
//! request each invocation translates to. It performs no I/O.
//!
//! # Architecture
//!
//! - [`catalog`] - Static table of operation descriptors and their schemas
//! - [`operation`] - Typed parameters and request building
//! - [`models`] - Requests, argument values and upstream settings
//! - [`error`] - Error taxonomy shared by every crate in the workspace
//!
//! # Example
//!
//! ```rust
//! use matrix_core::{HttpMethod, Operation};
//! use serde_json::json;
//!
//! let args = json!({"id": 7, "status": "review"});
//! let operation = Operation::decode("update_task_status", args.as_object().cloned()).unwrap();
//! let request = operation.to_request();
//!
//! assert_eq!(request.method, HttpMethod::Patch);
//! assert_eq!(request.path, "/api/task/7");
//! assert_eq!(request.body, Some(json!({"status": "review"})));
//! ```

pub mod catalog;
pub mod error;
pub mod models;
pub mod operation;

pub use catalog::{
    documented_statuses, find_operation, operations, OperationDescriptor, ParamKind, ParamSpec,
};
pub use error::{MatrixError, Result};
pub use models::{
    ApiRequest, ArgValue, HttpMethod, UpstreamSettings, API_KEY_HEADER, DEFAULT_BASE_URL,
};
pub use operation::{
    AddTaskNoteParams, GetMessagesParams, GetTaskParams, JsonObject, ListTasksParams, Operation,
    PostMessageParams, UpdateTaskStatusParams,
};

/// Current version of the core crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Current crate name
pub const CRATE_NAME: &str = env!("CARGO_PKG_NAME");
