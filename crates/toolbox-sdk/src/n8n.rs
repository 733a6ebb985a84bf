//! n8n workflow automation client.
//!
//! Workflow listing goes through the authenticated public API. Webhook
//! triggers go to the instance root, outside `/api/v1`, and carry no key.

use crate::env::ToolboxEnv;
use crate::error::SdkError;
use crate::http::{build_client, error_text, trim_base};
use serde_json::Value;
use tracing::{debug, info};

/// Header carrying the n8n API key
pub const API_KEY_HEADER: &str = "X-N8N-API-KEY";

const API_PREFIX: &str = "/api/v1";

/// n8n API client
#[derive(Debug, Clone)]
pub struct N8nClient {
    api_url: String,
    api_key: Option<String>,
    http: reqwest::Client,
}

impl N8nClient {
    /// Create a client for the given API base URL (usually ending in `/api/v1`)
    pub fn new(api_url: impl Into<String>, api_key: Option<String>) -> Result<Self, SdkError> {
        Ok(Self {
            api_url: trim_base(api_url),
            api_key,
            http: build_client()?,
        })
    }

    /// Create a client from resolved environment settings
    pub fn from_env(env: &ToolboxEnv) -> Result<Self, SdkError> {
        Self::new(env.n8n_api_url.clone(), env.n8n_api_key.clone())
    }

    /// Base URL for webhook triggers.
    ///
    /// Only the first `/api/v1` in the API URL is removed; a URL without that
    /// segment (e.g. `https://host/n8n/api`) is used unchanged.
    pub fn webhook_root(&self) -> String {
        self.api_url.replacen(API_PREFIX, "", 1)
    }

    /// List workflows on the instance
    pub async fn list_workflows(&self) -> Result<Value, SdkError> {
        self.get("workflows").await
    }

    /// Fetch a single workflow definition
    pub async fn get_workflow(&self, workflow_id: &str) -> Result<Value, SdkError> {
        self.get(&format!("workflows/{}", workflow_id)).await
    }

    /// POST `data` to a webhook and return the raw response body
    pub async fn trigger_webhook(&self, webhook_id: &str, data: &Value) -> Result<String, SdkError> {
        let url = format!("{}/webhook/{}", self.webhook_root(), webhook_id);
        info!("Triggering n8n webhook {}", webhook_id);

        let response = self.http.post(&url).json(data).send().await?;
        let status = response.status();
        let body = error_text(response).await;

        if !status.is_success() {
            return Err(SdkError::api("n8n", status.as_u16().to_string(), body));
        }
        Ok(body)
    }

    async fn get(&self, path: &str) -> Result<Value, SdkError> {
        let key = self
            .api_key
            .as_deref()
            .ok_or(SdkError::MissingCredential("N8N_API_KEY"))?;
        debug!("n8n request: GET /{}", path);

        let response = self
            .http
            .get(format!("{}/{}", self.api_url, path))
            .header(API_KEY_HEADER, key)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = error_text(response).await;
            return Err(SdkError::api("n8n", status.as_u16().to_string(), body));
        }

        Ok(response.json().await?)
    }
}
