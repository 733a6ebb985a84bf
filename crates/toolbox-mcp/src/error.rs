//! Error types for MCP server operations.

use thiserror::Error;
use toolbox_sdk::SdkError;

/// MCP server error types
#[derive(Error, Debug)]
pub enum McpError {
    /// Malformed JSON-RPC envelope
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Unknown JSON-RPC method
    #[error("Method not found: {0}")]
    MethodNotFound(String),

    /// Tool name or arguments do not match the tool schema
    #[error("Invalid params: {0}")]
    InvalidParams(String),

    /// Tool not found
    #[error("Tool not found: {0}")]
    ToolNotFound(String),

    /// Backend service call failed
    #[error(transparent)]
    Backend(#[from] SdkError),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl McpError {
    /// Convert to JSON-RPC error code
    pub fn error_code(&self) -> i32 {
        match self {
            McpError::InvalidRequest(_) => -32600,
            McpError::MethodNotFound(_) => -32601,
            McpError::ToolNotFound(_) => -32601,
            McpError::InvalidParams(_) => -32602,
            McpError::Backend(_) => -32000,
            McpError::JsonError(_) => -32700,
            McpError::IoError(_) => -32000,
        }
    }
}
