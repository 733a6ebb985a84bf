//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use serde_json::Value;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Where a service response keeps its rows, and which fields to show.
#[derive(Debug, Clone, Copy)]
pub struct Listing {
    /// Key of the array inside the response object
    pub key: &'static str,
    /// Field used as the row ID in quiet mode
    pub id_field: &'static str,
    /// `(header, field)` pairs shown in table mode
    pub columns: &'static [(&'static str, &'static str)],
}

/// Slack `conversations.list`
pub const SLACK_CHANNELS: Listing = Listing {
    key: "channels",
    id_field: "id",
    columns: &[("ID", "id"), ("Name", "name"), ("Private", "is_private"), ("Members", "num_members")],
};

/// Slack `conversations.history` / `conversations.replies`
pub const SLACK_MESSAGES: Listing = Listing {
    key: "messages",
    id_field: "ts",
    columns: &[("TS", "ts"), ("User", "user"), ("Text", "text")],
};

/// Slack `users.list`
pub const SLACK_USERS: Listing = Listing {
    key: "members",
    id_field: "id",
    columns: &[("ID", "id"), ("Name", "name"), ("Real name", "real_name")],
};

/// Notion search results
pub const NOTION_RESULTS: Listing = Listing {
    key: "results",
    id_field: "id",
    columns: &[("ID", "id"), ("Object", "object"), ("URL", "url"), ("Edited", "last_edited_time")],
};

/// n8n workflow list
pub const N8N_WORKFLOWS: Listing = Listing {
    key: "data",
    id_field: "id",
    columns: &[("ID", "id"), ("Name", "name"), ("Active", "active")],
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format a single object response (page, database, workflow).
    pub fn format_object(&self, value: &Value) -> Result<String> {
        match self.format {
            OutputFormat::Quiet => Ok(value
                .get("id")
                .map(plain)
                .unwrap_or_else(|| value.to_string())),
            _ => Ok(serde_json::to_string_pretty(value)?),
        }
    }

    /// Format a response holding a list of rows.
    ///
    /// Responses without the expected array fall back to pretty JSON.
    pub fn format_listing(&self, value: &Value, listing: &Listing) -> Result<String> {
        let rows = match value.get(listing.key).and_then(Value::as_array) {
            Some(rows) if self.format != OutputFormat::Json => rows,
            _ => return Ok(serde_json::to_string_pretty(value)?),
        };

        match self.format {
            OutputFormat::Quiet => Ok(rows
                .iter()
                .filter_map(|row| row.get(listing.id_field).map(plain))
                .collect::<Vec<_>>()
                .join("\n")),
            _ => Ok(self.format_table(rows, listing)),
        }
    }

    fn format_table(&self, rows: &[Value], listing: &Listing) -> String {
        if rows.is_empty() {
            return self.colorize("No results found.", "yellow");
        }

        let mut builder = Builder::default();
        builder.push_record(listing.columns.iter().map(|(header, _)| header.to_string()));

        for row in rows {
            builder.push_record(
                listing
                    .columns
                    .iter()
                    .map(|(_, field)| row.get(*field).map(plain).unwrap_or_default()),
            );
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        table.to_string()
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Format a numbered setup step header.
    pub fn step(&self, step: &str, message: &str) -> String {
        format!("\n{} {}", self.colorize(&format!("[{}]", step), "cyan"), message)
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().to_string(),
            _ => text.to_string(),
        }
    }
}

/// Render a JSON scalar without string quotes
fn plain(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
