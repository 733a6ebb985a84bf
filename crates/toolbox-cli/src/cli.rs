//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Toolbox CLI - Install the MCP toolbox and call its services directly.
#[derive(Debug, Parser)]
#[command(name = "toolbox")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log SDK requests to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format
    Table,
    /// JSON format (default)
    Json,
    /// Quiet format (IDs only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Install the toolbox into ~/.config/opencode
    Setup(SetupArgs),

    /// Slack commands
    #[command(subcommand)]
    Slack(SlackCommand),

    /// Notion commands
    #[command(subcommand)]
    Notion(NotionCommand),

    /// n8n commands
    #[command(subcommand)]
    N8n(N8nCommand),
}

/// Arguments for the setup command.
#[derive(Debug, Parser)]
pub struct SetupArgs {
    /// Overwrite existing files without asking
    #[arg(long)]
    pub force: bool,

    /// Directory holding .env.example and config/opencode.json.template
    #[arg(short, long, default_value = ".")]
    pub source: PathBuf,

    /// LM Studio endpoint written into opencode.json
    #[arg(long, env = "LM_STUDIO_URL")]
    pub lm_studio_url: Option<String>,
}

/// Slack subcommands.
#[derive(Debug, Subcommand)]
pub enum SlackCommand {
    /// List channels the bot can see
    ListChannels,

    /// Show recent messages in a channel
    History {
        /// Channel ID
        channel: String,
        /// Number of messages
        #[arg(short, long)]
        limit: Option<u32>,
    },

    /// Show replies in a thread
    Replies {
        /// Channel ID
        channel: String,
        /// Parent message timestamp
        ts: String,
    },

    /// List workspace users
    Users,
}

/// Notion subcommands.
#[derive(Debug, Subcommand)]
pub enum NotionCommand {
    /// Search pages and databases
    Search {
        /// Search text
        query: String,
    },

    /// Retrieve a page
    Page {
        /// Page ID
        id: String,
    },

    /// Retrieve a database
    Database {
        /// Database ID
        id: String,
    },
}

/// n8n subcommands.
#[derive(Debug, Subcommand)]
pub enum N8nCommand {
    /// List workflows
    List,

    /// Show a workflow
    Get {
        /// Workflow ID
        id: String,
    },

    /// Trigger a workflow webhook
    Trigger {
        /// Webhook ID
        webhook: String,
        /// JSON payload
        #[arg(short, long)]
        data: Option<String>,
    },
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}
