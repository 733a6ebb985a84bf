//! Unified Toolbox MCP Server - Main entry point

use anyhow::Context;
use toolbox_mcp::McpServer;
use toolbox_sdk::{env, Clients, ToolboxEnv};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // stdout carries the protocol, so logs go to stderr
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    if env::load_default_dotenv()?.is_none() {
        warn!("No .env file found; relying on process environment");
    }

    let toolbox_env = ToolboxEnv::from_env();
    for var in toolbox_env.missing_credentials() {
        warn!("{} is not set; its tools will return errors", var);
    }

    let clients = Clients::from_env(&toolbox_env).context("Failed to create service clients")?;
    info!("Serving {} tools", toolbox_mcp::tool_definitions().len());

    McpServer::new(clients)
        .run_stdio()
        .await
        .context("MCP server error")?;

    Ok(())
}
