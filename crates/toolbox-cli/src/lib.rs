//! Toolbox CLI library.
//!
//! This library provides the installer for the MCP toolbox and direct access
//! to the Slack, Notion and n8n clients, including configuration management,
//! command execution, and output formatting.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;
pub mod prompt;

pub use cli::{Cli, Command};
pub use config::Config;
pub use error::{CliError, Result};
pub use output::Formatter;
