//! Toolbox Rust SDK
//!
//! Thin clients for the services exposed by the toolbox: Slack (messaging),
//! Notion (workspace docs) and n8n (workflow automation). Each call is one
//! HTTP request whose JSON body is returned untouched.
//!
//! # Example
//!
//! ```no_run
//! use toolbox_sdk::{SlackClient, ToolboxEnv};
//!
//! # async fn demo() -> Result<(), toolbox_sdk::SdkError> {
//! let env = ToolboxEnv::from_env();
//! let slack = SlackClient::from_env(&env)?;
//! let channels = slack.list_channels().await?;
//! println!("{}", channels);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

pub mod env;
mod error;
mod http;
pub mod n8n;
pub mod notion;
pub mod slack;

pub use env::ToolboxEnv;
pub use error::SdkError;
pub use n8n::N8nClient;
pub use notion::NotionClient;
pub use slack::SlackClient;

/// All three service clients, built from one environment
#[derive(Debug, Clone)]
pub struct Clients {
    /// Slack client
    pub slack: SlackClient,
    /// Notion client
    pub notion: NotionClient,
    /// n8n client
    pub n8n: N8nClient,
}

impl Clients {
    /// Build every client from resolved environment settings
    pub fn from_env(env: &ToolboxEnv) -> Result<Self, SdkError> {
        Ok(Self {
            slack: SlackClient::from_env(env)?,
            notion: NotionClient::from_env(env)?,
            n8n: N8nClient::from_env(env)?,
        })
    }
}
