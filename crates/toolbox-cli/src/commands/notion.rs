//! Notion command implementation.

use crate::cli::NotionCommand;
use crate::error::Result;
use crate::output::{Formatter, NOTION_RESULTS};
use toolbox_sdk::NotionClient;

/// Execute a Notion subcommand and return the rendered output.
pub async fn execute_notion(
    command: NotionCommand,
    client: &NotionClient,
    formatter: &Formatter,
) -> Result<String> {
    match command {
        NotionCommand::Search { query } => {
            let data = client.search(&query).await?;
            formatter.format_listing(&data, &NOTION_RESULTS)
        }
        NotionCommand::Page { id } => formatter.format_object(&client.get_page(&id).await?),
        NotionCommand::Database { id } => formatter.format_object(&client.get_database(&id).await?),
    }
}
