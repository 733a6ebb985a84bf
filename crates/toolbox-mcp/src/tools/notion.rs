//! Notion tools

use crate::protocol::ToolDefinition;
use serde::Deserialize;
use serde_json::json;

pub const SEARCH: &str = "notion_search";
pub const GET_PAGE: &str = "notion_get_page";
pub const GET_DATABASE: &str = "notion_get_database";

/// Parameters for notion_search
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    /// Search text
    pub query: String,
}

/// Parameters for notion_get_page
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageParams {
    /// Page ID
    pub page_id: String,
}

/// Parameters for notion_get_database
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseParams {
    /// Database ID
    pub database_id: String,
}

pub(super) fn definitions() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition {
            name: SEARCH.to_string(),
            description: "Search Notion pages".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {"query": {"type": "string"}},
                "required": ["query"]
            }),
        },
        ToolDefinition {
            name: GET_PAGE.to_string(),
            description: "Retrieve a specific Notion page by ID".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {"pageId": {"type": "string"}},
                "required": ["pageId"]
            }),
        },
        ToolDefinition {
            name: GET_DATABASE.to_string(),
            description: "Retrieve a specific Notion database by ID".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {"databaseId": {"type": "string"}},
                "required": ["databaseId"]
            }),
        },
    ]
}
