//! Toolbox CLI - installer and direct service access for the MCP toolbox.

use clap::Parser;
use toolbox_cli::commands;
use toolbox_cli::{Cli, Command, Config, Formatter};
use toolbox_sdk::{N8nClient, NotionClient, SlackClient};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> toolbox_cli::Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(
                EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| EnvFilter::new("toolbox_sdk=debug,info")),
            )
            .with_target(false)
            .compact()
            .init();
    }

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load().unwrap_or_default(),
    };

    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);
    let color_enabled = !cli.no_color && config.settings.color;
    let formatter = Formatter::new(format, color_enabled);

    let output = match cli.command {
        Command::Setup(args) => {
            commands::execute_setup(args, &formatter)?;
            return Ok(());
        }
        Command::Slack(cmd) => {
            let env = commands::load_env(&config)?;
            let client = SlackClient::from_env(&env)?;
            commands::execute_slack(cmd, &client, &formatter).await?
        }
        Command::Notion(cmd) => {
            let env = commands::load_env(&config)?;
            let client = NotionClient::from_env(&env)?;
            commands::execute_notion(cmd, &client, &formatter).await?
        }
        Command::N8n(cmd) => {
            let env = commands::load_env(&config)?;
            let client = N8nClient::from_env(&env)?;
            commands::execute_n8n(cmd, &client, &formatter).await?
        }
    };

    println!("{}", output);
    Ok(())
}
