//! Environment and `.env` loading.
//!
//! Service credentials and endpoints come from process environment variables.
//! A `.env` file is looked up next to the installed binary first, then one
//! directory up, and is only used to fill variables that are not already set.

use crate::error::SdkError;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Default Slack Web API base URL
pub const DEFAULT_SLACK_API_URL: &str = "https://slack.com/api";

/// Default Notion API base URL
pub const DEFAULT_NOTION_API_URL: &str = "https://api.notion.com/v1";

/// Default n8n public API base URL
pub const DEFAULT_N8N_API_URL: &str = "http://localhost:5678/api/v1";

/// Variable that points at an explicit `.env` file
pub const ENV_FILE_VAR: &str = "TOOLBOX_ENV_FILE";

/// Resolved service configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolboxEnv {
    /// Slack bot token (`SLACK_BOT_TOKEN`)
    pub slack_token: Option<String>,
    /// Slack API base URL (`SLACK_API_URL`)
    pub slack_api_url: String,
    /// Notion integration secret (`NOTION_API_KEY`)
    pub notion_api_key: Option<String>,
    /// Notion API base URL (`NOTION_API_URL`)
    pub notion_api_url: String,
    /// n8n API base URL (`N8N_API_URL`)
    pub n8n_api_url: String,
    /// n8n API key (`N8N_API_KEY`)
    pub n8n_api_key: Option<String>,
}

impl ToolboxEnv {
    /// Read configuration from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary lookup function.
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            slack_token: get("SLACK_BOT_TOKEN"),
            slack_api_url: get("SLACK_API_URL")
                .unwrap_or_else(|| DEFAULT_SLACK_API_URL.to_string()),
            notion_api_key: get("NOTION_API_KEY"),
            notion_api_url: get("NOTION_API_URL")
                .unwrap_or_else(|| DEFAULT_NOTION_API_URL.to_string()),
            n8n_api_url: get("N8N_API_URL").unwrap_or_else(|| DEFAULT_N8N_API_URL.to_string()),
            n8n_api_key: get("N8N_API_KEY"),
        }
    }

    /// Names of the credential variables that are not set
    pub fn missing_credentials(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.slack_token.is_none() {
            missing.push("SLACK_BOT_TOKEN");
        }
        if self.notion_api_key.is_none() {
            missing.push("NOTION_API_KEY");
        }
        if self.n8n_api_key.is_none() {
            missing.push("N8N_API_KEY");
        }
        missing
    }
}

impl Default for ToolboxEnv {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

/// Candidate `.env` locations, in priority order
pub fn env_file_candidates(explicit: Option<PathBuf>, exe_dir: Option<&Path>) -> Vec<PathBuf> {
    let mut candidates = Vec::new();
    if let Some(path) = explicit {
        candidates.push(path);
    }
    if let Some(dir) = exe_dir {
        candidates.push(dir.join(".env"));
        candidates.push(dir.join("..").join(".env"));
    }
    candidates
}

/// Load the first existing `.env` candidate into the process environment.
///
/// Returns the path that was loaded, or `None` if no candidate exists.
pub fn load_dotenv(candidates: &[PathBuf]) -> Result<Option<PathBuf>, SdkError> {
    match candidates.iter().find(|p| p.is_file()) {
        Some(path) => {
            dotenvy::from_path(path)?;
            info!("Loaded environment from {}", path.display());
            Ok(Some(path.clone()))
        }
        None => {
            debug!("No .env file found in {} candidate(s)", candidates.len());
            Ok(None)
        }
    }
}

/// Discover and load `.env` for the running executable
pub fn load_default_dotenv() -> Result<Option<PathBuf>, SdkError> {
    let explicit = std::env::var_os(ENV_FILE_VAR).map(PathBuf::from);
    let exe_dir = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf));
    load_dotenv(&env_file_candidates(explicit, exe_dir.as_deref()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_from(pairs: &[(&str, &str)]) -> ToolboxEnv {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ToolboxEnv::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let env = ToolboxEnv::default();
        assert_eq!(env.slack_api_url, DEFAULT_SLACK_API_URL);
        assert_eq!(env.notion_api_url, DEFAULT_NOTION_API_URL);
        assert_eq!(env.n8n_api_url, DEFAULT_N8N_API_URL);
        assert_eq!(
            env.missing_credentials(),
            vec!["SLACK_BOT_TOKEN", "NOTION_API_KEY", "N8N_API_KEY"]
        );
    }

    #[test]
    fn test_values_and_empty_as_unset() {
        let env = env_from(&[
            ("SLACK_BOT_TOKEN", "xoxb-1"),
            ("NOTION_API_KEY", "   "),
            ("N8N_API_URL", "http://n8n.local/api/v1"),
        ]);
        assert_eq!(env.slack_token.as_deref(), Some("xoxb-1"));
        assert!(env.notion_api_key.is_none());
        assert_eq!(env.n8n_api_url, "http://n8n.local/api/v1");
    }

    #[test]
    fn test_candidate_order() {
        let dir = Path::new("/opt/tools");
        let candidates = env_file_candidates(Some(PathBuf::from("/etc/custom.env")), Some(dir));
        assert_eq!(
            candidates,
            vec![
                PathBuf::from("/etc/custom.env"),
                PathBuf::from("/opt/tools/.env"),
                PathBuf::from("/opt/tools/../.env"),
            ]
        );
    }

    #[test]
    fn test_load_dotenv_picks_first_existing() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("tools");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(
            dir.path().join(".env"),
            "TOOLBOX_SDK_TEST_ONLY_VAR=from-parent\n",
        )
        .unwrap();

        let candidates = env_file_candidates(None, Some(&nested));
        let loaded = load_dotenv(&candidates).unwrap();
        assert_eq!(loaded, Some(nested.join("..").join(".env")));
        assert_eq!(
            std::env::var("TOOLBOX_SDK_TEST_ONLY_VAR").as_deref(),
            Ok("from-parent")
        );
    }

    #[test]
    fn test_load_dotenv_none_found() {
        let dir = tempfile::tempdir().unwrap();
        let candidates = env_file_candidates(None, Some(dir.path()));
        assert_eq!(load_dotenv(&candidates).unwrap(), None);
    }
}
