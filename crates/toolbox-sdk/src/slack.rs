//! Slack Web API client.
//!
//! Thin wrapper over the conversation and user listing methods. Slack answers
//! every call with HTTP 200 and reports failures in the `ok`/`error` fields,
//! so the body is inspected rather than the status code.

use crate::env::ToolboxEnv;
use crate::error::SdkError;
use crate::http::{build_client, trim_base};
use serde_json::Value;
use tracing::debug;

/// Default number of messages returned by [`SlackClient::get_history`]
pub const DEFAULT_HISTORY_LIMIT: u32 = 20;

/// Page size used for channel and user listings
const LIST_LIMIT: &str = "1000";

/// Slack Web API client
#[derive(Debug, Clone)]
pub struct SlackClient {
    base_url: String,
    token: Option<String>,
    http: reqwest::Client,
}

impl SlackClient {
    /// Create a client for the given API base URL and bot token
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> Result<Self, SdkError> {
        Ok(Self {
            base_url: trim_base(base_url),
            token,
            http: build_client()?,
        })
    }

    /// Create a client from resolved environment settings
    pub fn from_env(env: &ToolboxEnv) -> Result<Self, SdkError> {
        Self::new(env.slack_api_url.clone(), env.slack_token.clone())
    }

    /// List public and private channels the bot can see
    pub async fn list_channels(&self) -> Result<Value, SdkError> {
        self.call(
            "conversations.list",
            &[("types", "public_channel,private_channel"), ("limit", LIST_LIMIT)],
        )
        .await
    }

    /// Message history for a channel, newest first
    pub async fn get_history(&self, channel_id: &str, limit: Option<u32>) -> Result<Value, SdkError> {
        let limit = limit.unwrap_or(DEFAULT_HISTORY_LIMIT).to_string();
        self.call(
            "conversations.history",
            &[("channel", channel_id), ("limit", limit.as_str())],
        )
        .await
    }

    /// Replies in the thread rooted at `thread_ts`
    pub async fn get_thread_replies(&self, channel_id: &str, thread_ts: &str) -> Result<Value, SdkError> {
        self.call(
            "conversations.replies",
            &[("channel", channel_id), ("ts", thread_ts)],
        )
        .await
    }

    /// List workspace members
    pub async fn list_users(&self) -> Result<Value, SdkError> {
        self.call("users.list", &[("limit", LIST_LIMIT)]).await
    }

    async fn call(&self, method: &str, query: &[(&str, &str)]) -> Result<Value, SdkError> {
        let token = self
            .token
            .as_deref()
            .ok_or(SdkError::MissingCredential("SLACK_BOT_TOKEN"))?;
        let url = format!("{}/{}", self.base_url, method);
        debug!("Slack request: {}", method);

        let data: Value = self
            .http
            .get(&url)
            .bearer_auth(token)
            .query(query)
            .send()
            .await?
            .json()
            .await?;

        if data.get("ok").and_then(Value::as_bool) != Some(true) {
            let error = data
                .get("error")
                .and_then(Value::as_str)
                .unwrap_or("unknown_error");
            return Err(SdkError::api("Slack", method, error));
        }

        Ok(data)
    }
}
