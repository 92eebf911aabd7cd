use thiserror::Error;

/// Result type alias for adapter operations
pub type Result<T> = std::result::Result<T, MatrixError>;

/// Error types for the Matrix MCP adapter.
///
/// Every variant except [`MatrixError::Configuration`] is converted into an
/// error-flagged tool result at the dispatch boundary. Configuration errors
/// only occur at startup and terminate the process.
///
/// # Examples
///
/// ```rust
/// use matrix_core::error::MatrixError;
///
/// let err = MatrixError::upstream(404, r#"{"error":"not found"}"#);
/// assert_eq!(err.to_string(), r#"Matrix API error 404: {"error":"not found"}"#);
/// assert_eq!(err.upstream_status(), Some(404));
///
/// let err = MatrixError::unknown_tool("delete_everything");
/// assert_eq!(err.to_string(), "Unknown tool: delete_everything");
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MatrixError {
    /// Invalid or missing process configuration
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The caller named an operation that is not in the catalog
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// The argument bag could not be decoded into the operation's parameters
    #[error("Malformed arguments for {tool}: {reason}")]
    MalformedArguments { tool: String, reason: String },

    /// The upstream API answered with a non-2xx status
    #[error("Matrix API error {status}: {body}")]
    Upstream { status: u16, body: String },

    /// The request never produced a response (connect, TLS, body read)
    #[error("{0}")]
    Transport(String),

    /// A 2xx response whose body is not valid JSON
    #[error("Invalid JSON in Matrix API response: {0}")]
    InvalidResponse(String),
}

impl MatrixError {
    /// Create an unknown tool error
    pub fn unknown_tool(name: &str) -> Self {
        Self::UnknownTool(name.to_string())
    }

    /// Create a malformed arguments error for a tool
    pub fn malformed(tool: &str, reason: impl Into<String>) -> Self {
        Self::MalformedArguments {
            tool: tool.to_string(),
            reason: reason.into(),
        }
    }

    /// Create an upstream failure from a status code and the rendered body
    pub fn upstream(status: u16, body: impl Into<String>) -> Self {
        Self::Upstream {
            status,
            body: body.into(),
        }
    }

    /// Status code of an upstream failure, if this is one
    pub fn upstream_status(&self) -> Option<u16> {
        match self {
            MatrixError::Upstream { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Check if this error was caused by the caller rather than the upstream API
    pub fn is_caller_error(&self) -> bool {
        matches!(
            self,
            MatrixError::UnknownTool(_) | MatrixError::MalformedArguments { .. }
        )
    }
}
