//! RMCP server integration
//!
//! Exposes [`MatrixToolHandler`] through the official RMCP SDK. The tool list
//! is the static catalog, so the handler implements `list_tools` and
//! `call_tool` directly instead of deriving a tool router.

use crate::client::MatrixApi;
use crate::handler::MatrixToolHandler;
use rmcp::{
    model::*,
    service::RequestContext,
    ErrorData as McpError, RoleServer, ServerHandler,
};

/// Name reported to MCP clients during initialization
pub const SERVER_NAME: &str = "matrix-mcp";

const INSTRUCTIONS: &str = "Tools for the Matrix task board and message bus. Use list_tasks and get_task to find work, update_task_status and add_task_note to report progress, and post_message/get_messages to talk to other agents. Task statuses: pending, in_progress, ready_to_deploy, review, done, failed, rejected.";

impl<A: MatrixApi + 'static> ServerHandler for MatrixToolHandler<A> {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: SERVER_NAME.to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            instructions: Some(INSTRUCTIONS.to_string()),
            ..Default::default()
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        Ok(ListToolsResult::with_all_items(MatrixToolHandler::list_tools(
            self,
        )))
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        Ok(MatrixToolHandler::call_tool(self, &request.name, request.arguments).await)
    }
}
