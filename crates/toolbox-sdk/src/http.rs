//! Shared HTTP plumbing for the service clients.

use crate::error::SdkError;
use std::time::Duration;

/// Default timeout for API requests (30 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Build the reqwest client every service client uses
pub(crate) fn build_client() -> Result<reqwest::Client, SdkError> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
        .user_agent(concat!("toolbox-sdk/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| SdkError::Connection(format!("Failed to create HTTP client: {}", e)))
}

/// Strip a trailing slash so paths can be appended with `/`
pub(crate) fn trim_base(url: impl Into<String>) -> String {
    let mut url = url.into();
    while url.ends_with('/') {
        url.pop();
    }
    url
}

/// Read a failed response body, never failing itself
pub(crate) async fn error_text(response: reqwest::Response) -> String {
    response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string())
}
