//! Slack tools

use crate::protocol::ToolDefinition;
use serde::Deserialize;
use serde_json::json;

pub const LIST_CHANNELS: &str = "slack_list_channels";
pub const GET_HISTORY: &str = "slack_get_history";
pub const GET_THREAD_REPLIES: &str = "slack_get_thread_replies";
pub const LIST_USERS: &str = "slack_list_users";

/// Parameters for slack_get_history
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryParams {
    /// Channel to read
    pub channel_id: String,
    /// Number of messages (defaults to 20)
    #[serde(default)]
    pub limit: Option<u32>,
}

/// Parameters for slack_get_thread_replies
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreadRepliesParams {
    /// Channel holding the thread
    pub channel_id: String,
    /// Timestamp of the parent message
    pub thread_ts: String,
}

pub(super) fn definitions() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition {
            name: LIST_CHANNELS.to_string(),
            description: "List all public and private channels the bot has access to".to_string(),
            input_schema: json!({"type": "object", "properties": {}}),
        },
        ToolDefinition {
            name: GET_HISTORY.to_string(),
            description: "Get message history for a channel".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "channelId": {"type": "string", "description": "The ID of the channel"},
                    "limit": {"type": "integer", "minimum": 1, "description": "Number of messages to retrieve (default 20)"}
                },
                "required": ["channelId"]
            }),
        },
        ToolDefinition {
            name: GET_THREAD_REPLIES.to_string(),
            description: "Get replies for a specific message thread".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "channelId": {"type": "string"},
                    "threadTs": {"type": "string", "description": "The timestamp (ts) of the parent message"}
                },
                "required": ["channelId", "threadTs"]
            }),
        },
        ToolDefinition {
            name: LIST_USERS.to_string(),
            description: "List all users in the workspace to find names and IDs".to_string(),
            input_schema: json!({"type": "object", "properties": {}}),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_params_deserialize() {
        let params: HistoryParams =
            serde_json::from_str(r#"{"channelId": "C123", "limit": 5}"#).unwrap();
        assert_eq!(params.channel_id, "C123");
        assert_eq!(params.limit, Some(5));

        let params: HistoryParams = serde_json::from_str(r#"{"channelId": "C123"}"#).unwrap();
        assert_eq!(params.limit, None);
    }

    #[test]
    fn test_thread_params_require_ts() {
        let result = serde_json::from_str::<ThreadRepliesParams>(r#"{"channelId": "C1"}"#);
        assert!(result.is_err());
    }
}
