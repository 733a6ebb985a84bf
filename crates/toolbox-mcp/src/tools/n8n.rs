//! n8n tools

use crate::protocol::ToolDefinition;
use serde::{Deserialize, Deserializer};
use serde_json::{json, Value};

pub const LIST_WORKFLOWS: &str = "n8n_list_workflows";
pub const GET_WORKFLOW: &str = "n8n_get_workflow";
pub const TRIGGER_WEBHOOK: &str = "n8n_trigger_webhook";

/// Parameters for n8n_get_workflow
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowParams {
    /// Workflow ID
    pub workflow_id: String,
}

/// Parameters for n8n_trigger_webhook
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriggerParams {
    /// Webhook path segment
    pub webhook_id: String,
    /// JSON payload; missing or null posts `{}`
    #[serde(default = "empty_object", deserialize_with = "null_as_empty")]
    pub data: Value,
}

fn empty_object() -> Value {
    json!({})
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Value, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(if value.is_null() { empty_object() } else { value })
}

pub(super) fn definitions() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition {
            name: LIST_WORKFLOWS.to_string(),
            description: "List local n8n workflows".to_string(),
            input_schema: json!({"type": "object", "properties": {}}),
        },
        ToolDefinition {
            name: GET_WORKFLOW.to_string(),
            description: "Get details of a specific n8n workflow".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {"workflowId": {"type": "string"}},
                "required": ["workflowId"]
            }),
        },
        ToolDefinition {
            name: TRIGGER_WEBHOOK.to_string(),
            description: "Trigger an n8n workflow via webhook".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "webhookId": {"type": "string"},
                    "data": {"type": "object"}
                },
                "required": ["webhookId"]
            }),
        },
    ]
}
