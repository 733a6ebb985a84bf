//! n8n command implementation.

use crate::cli::N8nCommand;
use crate::error::{CliError, Result};
use crate::output::{Formatter, N8N_WORKFLOWS};
use serde_json::{json, Value};
use toolbox_sdk::N8nClient;

/// Execute an n8n subcommand and return the rendered output.
pub async fn execute_n8n(
    command: N8nCommand,
    client: &N8nClient,
    formatter: &Formatter,
) -> Result<String> {
    match command {
        N8nCommand::List => {
            let data = client.list_workflows().await?;
            formatter.format_listing(&data, &N8N_WORKFLOWS)
        }
        N8nCommand::Get { id } => formatter.format_object(&client.get_workflow(&id).await?),
        N8nCommand::Trigger { webhook, data } => {
            let payload = parse_payload(data.as_deref())?;
            let body = client.trigger_webhook(&webhook, &payload).await?;
            Ok(body)
        }
    }
}

/// Parse the `--data` payload; absent means `{}`.
fn parse_payload(data: Option<&str>) -> Result<Value> {
    match data {
        None => Ok(json!({})),
        Some(raw) => serde_json::from_str(raw)
            .map_err(|e| CliError::InvalidInput(format!("--data is not valid JSON: {}", e))),
    }
}
