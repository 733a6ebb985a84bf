//! Command implementations.

pub mod n8n;
pub mod notion;
pub mod setup;
pub mod slack;

pub use self::n8n::execute_n8n;
pub use self::notion::execute_notion;
pub use self::setup::execute_setup;
pub use self::slack::execute_slack;

use crate::config::{opencode_dir, Config};
use crate::error::Result;
use std::path::PathBuf;
use toolbox_sdk::{env, ToolboxEnv};

/// Resolve service settings for direct commands.
///
/// `.env` lookup order: the configured `env_file`, `TOOLBOX_ENV_FILE`, the
/// installed `tools/.env`, then `./.env`.
pub fn load_env(config: &Config) -> Result<ToolboxEnv> {
    let mut candidates: Vec<PathBuf> = config.env_file.iter().cloned().collect();
    if let Some(path) = std::env::var_os(env::ENV_FILE_VAR) {
        candidates.push(PathBuf::from(path));
    }
    if let Ok(dir) = opencode_dir() {
        candidates.push(dir.join("tools").join(".env"));
    }
    candidates.push(PathBuf::from(".env"));

    env::load_dotenv(&candidates)?;
    Ok(ToolboxEnv::from_env())
}
