//! Notion REST API client.

use crate::env::ToolboxEnv;
use crate::error::SdkError;
use crate::http::{build_client, error_text, trim_base};
use serde_json::{json, Value};
use tracing::debug;

/// API version sent in the `Notion-Version` header
pub const NOTION_VERSION: &str = "2022-06-28";

/// Notion API client
#[derive(Debug, Clone)]
pub struct NotionClient {
    base_url: String,
    api_key: Option<String>,
    http: reqwest::Client,
}

impl NotionClient {
    /// Create a client for the given API base URL and integration secret
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Result<Self, SdkError> {
        Ok(Self {
            base_url: trim_base(base_url),
            api_key,
            http: build_client()?,
        })
    }

    /// Create a client from resolved environment settings
    pub fn from_env(env: &ToolboxEnv) -> Result<Self, SdkError> {
        Self::new(env.notion_api_url.clone(), env.notion_api_key.clone())
    }

    /// Search pages and databases shared with the integration
    pub async fn search(&self, query: &str) -> Result<Value, SdkError> {
        let request = self.request(reqwest::Method::POST, "search")?;
        Self::send(request.json(&json!({ "query": query }))).await
    }

    /// Retrieve a page by ID
    pub async fn get_page(&self, page_id: &str) -> Result<Value, SdkError> {
        let request = self.request(reqwest::Method::GET, &format!("pages/{}", page_id))?;
        Self::send(request).await
    }

    /// Retrieve a database by ID
    pub async fn get_database(&self, database_id: &str) -> Result<Value, SdkError> {
        let request = self.request(reqwest::Method::GET, &format!("databases/{}", database_id))?;
        Self::send(request).await
    }

    fn request(&self, method: reqwest::Method, path: &str) -> Result<reqwest::RequestBuilder, SdkError> {
        let key = self
            .api_key
            .as_deref()
            .ok_or(SdkError::MissingCredential("NOTION_API_KEY"))?;
        debug!("Notion request: {} /{}", method, path);

        Ok(self
            .http
            .request(method, format!("{}/{}", self.base_url, path))
            .bearer_auth(key)
            .header("Notion-Version", NOTION_VERSION))
    }

    async fn send(request: reqwest::RequestBuilder) -> Result<Value, SdkError> {
        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = error_text(response).await;
            // Notion error bodies look like {"object":"error","code":..,"message":..}
            let message = serde_json::from_str::<Value>(&body)
                .ok()
                .and_then(|v| v.get("message").and_then(Value::as_str).map(str::to_string))
                .unwrap_or(body);
            return Err(SdkError::api("Notion", status.as_u16().to_string(), message));
        }

        Ok(response.json().await?)
    }
}
