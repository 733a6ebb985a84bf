//! MCP tool registry and dispatch
//!
//! The tool set is fixed: every tool maps one-to-one onto a client call in
//! `toolbox-sdk`. Arguments are decoded into typed params, the backend JSON
//! is returned untouched.

pub mod n8n;
pub mod notion;
pub mod slack;

use crate::error::McpError;
use crate::protocol::ToolDefinition;
use serde::de::DeserializeOwned;
use serde_json::Value;
use toolbox_sdk::Clients;

/// Every tool definition, in the order `tools/list` reports them
pub fn definitions() -> Vec<ToolDefinition> {
    let mut tools = slack::definitions();
    tools.extend(notion::definitions());
    tools.extend(n8n::definitions());
    tools
}

/// Route a tool call to its backend.
///
/// Webhook triggers answer with plain text, which is returned as a JSON string.
pub async fn dispatch(clients: &Clients, name: &str, arguments: Value) -> Result<Value, McpError> {
    let value = match name {
        slack::LIST_CHANNELS => clients.slack.list_channels().await?,
        slack::GET_HISTORY => {
            let params: slack::HistoryParams = parse(name, arguments)?;
            clients.slack.get_history(&params.channel_id, params.limit).await?
        }
        slack::GET_THREAD_REPLIES => {
            let params: slack::ThreadRepliesParams = parse(name, arguments)?;
            clients
                .slack
                .get_thread_replies(&params.channel_id, &params.thread_ts)
                .await?
        }
        slack::LIST_USERS => clients.slack.list_users().await?,
        notion::SEARCH => {
            let params: notion::SearchParams = parse(name, arguments)?;
            clients.notion.search(&params.query).await?
        }
        notion::GET_PAGE => {
            let params: notion::PageParams = parse(name, arguments)?;
            clients.notion.get_page(&params.page_id).await?
        }
        notion::GET_DATABASE => {
            let params: notion::DatabaseParams = parse(name, arguments)?;
            clients.notion.get_database(&params.database_id).await?
        }
        n8n::LIST_WORKFLOWS => clients.n8n.list_workflows().await?,
        n8n::GET_WORKFLOW => {
            let params: n8n::WorkflowParams = parse(name, arguments)?;
            clients.n8n.get_workflow(&params.workflow_id).await?
        }
        n8n::TRIGGER_WEBHOOK => {
            let params: n8n::TriggerParams = parse(name, arguments)?;
            Value::String(
                clients
                    .n8n
                    .trigger_webhook(&params.webhook_id, &params.data)
                    .await?,
            )
        }
        _ => return Err(McpError::ToolNotFound(name.to_string())),
    };

    Ok(value)
}

fn parse<T: DeserializeOwned>(tool: &str, arguments: Value) -> Result<T, McpError> {
    serde_json::from_value(arguments)
        .map_err(|e| McpError::InvalidParams(format!("Invalid arguments for {}: {}", tool, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use toolbox_sdk::ToolboxEnv;

    #[test]
    fn test_ten_unique_tools() {
        let defs = definitions();
        assert_eq!(defs.len(), 10);

        let names: HashSet<_> = defs.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names.len(), 10);
        assert!(names.contains("slack_get_thread_replies"));
        assert!(names.contains("n8n_trigger_webhook"));
    }

    #[test]
    fn test_required_fields_are_declared_properties() {
        for def in definitions() {
            assert_eq!(def.input_schema["type"], "object", "{}", def.name);
            let props = def.input_schema["properties"].as_object().unwrap();
            if let Some(required) = def.input_schema.get("required") {
                for field in required.as_array().unwrap() {
                    assert!(props.contains_key(field.as_str().unwrap()), "{}", def.name);
                }
            }
        }
    }

    #[test]
    fn test_history_limit_is_integer() {
        let def = definitions()
            .into_iter()
            .find(|d| d.name == slack::GET_HISTORY)
            .unwrap();
        assert_eq!(def.input_schema["properties"]["limit"]["type"], "integer");

        let params: slack::HistoryParams =
            parse(slack::GET_HISTORY, serde_json::json!({"channelId": "C1", "limit": 5})).unwrap();
        assert_eq!(params.limit, Some(5));
    }

    #[tokio::test]
    async fn test_unknown_tool() {
        let clients = Clients::from_env(&ToolboxEnv::default()).unwrap();
        let err = dispatch(&clients, "jira_list_issues", Value::Null)
            .await
            .unwrap_err();
        assert!(matches!(err, McpError::ToolNotFound(_)));
    }

    #[tokio::test]
    async fn test_bad_arguments_are_invalid_params() {
        let clients = Clients::from_env(&ToolboxEnv::default()).unwrap();
        let err = dispatch(&clients, notion::GET_PAGE, serde_json::json!({"id": "x"}))
            .await
            .unwrap_err();
        assert!(matches!(err, McpError::InvalidParams(_)));
    }
}
