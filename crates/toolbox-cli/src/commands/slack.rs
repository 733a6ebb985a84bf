//! Slack command implementation.

use crate::cli::SlackCommand;
use crate::error::Result;
use crate::output::{Formatter, SLACK_CHANNELS, SLACK_MESSAGES, SLACK_USERS};
use toolbox_sdk::SlackClient;

/// Execute a Slack subcommand and return the rendered output.
pub async fn execute_slack(
    command: SlackCommand,
    client: &SlackClient,
    formatter: &Formatter,
) -> Result<String> {
    match command {
        SlackCommand::ListChannels => {
            let data = client.list_channels().await?;
            formatter.format_listing(&data, &SLACK_CHANNELS)
        }
        SlackCommand::History { channel, limit } => {
            let data = client.get_history(&channel, limit).await?;
            formatter.format_listing(&data, &SLACK_MESSAGES)
        }
        SlackCommand::Replies { channel, ts } => {
            let data = client.get_thread_replies(&channel, &ts).await?;
            formatter.format_listing(&data, &SLACK_MESSAGES)
        }
        SlackCommand::Users => {
            let data = client.list_users().await?;
            formatter.format_listing(&data, &SLACK_USERS)
        }
    }
}
