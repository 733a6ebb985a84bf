//! Unified Toolbox MCP Server
//!
//! Model Context Protocol server that puts Slack, Notion and n8n behind one
//! stdio tool surface for AI clients (OpenCode, Claude Desktop, etc.).
//!
//! Provides 10 MCP tools:
//! - `slack_list_channels`, `slack_get_history`, `slack_get_thread_replies`, `slack_list_users`
//! - `notion_search`, `notion_get_page`, `notion_get_database`
//! - `n8n_list_workflows`, `n8n_get_workflow`, `n8n_trigger_webhook`
//!
//! # Example
//!
//! ```no_run
//! use toolbox_mcp::McpServer;
//! use toolbox_sdk::{Clients, ToolboxEnv};
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let clients = Clients::from_env(&ToolboxEnv::from_env())?;
//! McpServer::new(clients).run_stdio().await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod error;
pub mod protocol;
mod server;
mod tools;

pub use error::McpError;
pub use server::McpServer;
pub use tools::definitions as tool_definitions;
