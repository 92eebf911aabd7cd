use anyhow::{Context, Result};
use mcp_protocol::{MatrixClient, MatrixToolHandler};
use std::sync::Arc;
use tracing::info;

use crate::config::Config;

/// Create the HTTP client for the Matrix API
pub fn create_client(config: &Config) -> Result<Arc<MatrixClient>> {
    let settings = config.upstream_settings();
    info!(base_url = %settings.base_url(), "Creating Matrix API client");

    let client = MatrixClient::new(settings).context("Failed to create Matrix API client")?;
    Ok(Arc::new(client))
}

/// Create the MCP tool handler
pub fn create_handler(client: Arc<MatrixClient>) -> MatrixToolHandler<MatrixClient> {
    let handler = MatrixToolHandler::new(client);
    info!(tools = handler.list_tools().len(), "MCP tool handler created");
    handler
}

/// Initialize the complete application
pub fn initialize_app(config: &Config) -> Result<MatrixToolHandler<MatrixClient>> {
    let client = create_client(config)?;
    Ok(create_handler(client))
}
