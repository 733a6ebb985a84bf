//! Error types for the toolbox SDK.

use thiserror::Error;

/// SDK operation errors
#[derive(Debug, Error)]
pub enum SdkError {
    /// A credential the service needs is not configured
    #[error("Missing credential: set {0} in the environment or .env file")]
    MissingCredential(&'static str),

    /// Connection error (network, DNS, timeout)
    #[error("Connection error: {0}")]
    Connection(String),

    /// The remote API answered with an error
    #[error("{service} API error ({context}): {message}")]
    Api {
        /// Service name as shown to users
        service: &'static str,
        /// Endpoint or HTTP status the error came from
        context: String,
        /// Message reported by the service
        message: String,
    },

    /// Response body could not be decoded
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// `.env` file could not be loaded
    #[error("Environment error: {0}")]
    Env(String),
}

impl SdkError {
    pub(crate) fn api(
        service: &'static str,
        context: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        SdkError::Api {
            service,
            context: context.into(),
            message: message.into(),
        }
    }
}

impl From<reqwest::Error> for SdkError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_connect() || e.is_timeout() {
            SdkError::Connection(e.to_string())
        } else if e.is_decode() {
            SdkError::InvalidResponse(e.to_string())
        } else {
            SdkError::Connection(e.to_string())
        }
    }
}

impl From<serde_json::Error> for SdkError {
    fn from(e: serde_json::Error) -> Self {
        SdkError::InvalidResponse(format!("JSON parsing error: {}", e))
    }
}

impl From<dotenvy::Error> for SdkError {
    fn from(e: dotenvy::Error) -> Self {
        SdkError::Env(e.to_string())
    }
}
