//! Integration tests for MCP server
//!
//! These drive the server over an in-memory line stream, with a mock HTTP
//! server standing in for Slack, Notion and n8n.

use httpmock::prelude::*;
use serde_json::{json, Value};
use std::collections::HashMap;
use toolbox_mcp::McpServer;
use toolbox_sdk::{Clients, ToolboxEnv};

fn server_for(mock: &MockServer) -> McpServer {
    let mut vars = HashMap::new();
    vars.insert("SLACK_API_URL", mock.url("/slack"));
    vars.insert("SLACK_BOT_TOKEN", "xoxb-test".to_string());
    vars.insert("NOTION_API_URL", mock.url("/notion"));
    vars.insert("NOTION_API_KEY", "secret_test".to_string());
    vars.insert("N8N_API_URL", mock.url("/api/v1"));
    vars.insert("N8N_API_KEY", "n8n-test".to_string());

    let env = ToolboxEnv::from_lookup(|key| vars.get(key).cloned());
    McpServer::new(Clients::from_env(&env).unwrap())
}

async fn exchange(server: &McpServer, requests: &[Value]) -> Vec<Value> {
    let input: String = requests
        .iter()
        .map(|r| format!("{}\n", r))
        .collect();
    let mut output = Vec::new();
    server.run(input.as_bytes(), &mut output).await.unwrap();

    String::from_utf8(output)
        .unwrap()
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect()
}

fn tool_text(response: &Value) -> &str {
    response["result"]["content"][0]["text"].as_str().unwrap()
}

#[tokio::test]
async fn test_handshake_and_tool_list() {
    let mock = MockServer::start_async().await;
    let server = server_for(&mock);

    let responses = exchange(
        &server,
        &[
            json!({"jsonrpc": "2.0", "id": 1, "method": "initialize", "params": {"protocolVersion": "2024-11-05"}}),
            json!({"jsonrpc": "2.0", "method": "notifications/initialized"}),
            json!({"jsonrpc": "2.0", "id": 2, "method": "tools/list"}),
        ],
    )
    .await;

    // the notification produces no line
    assert_eq!(responses.len(), 2);
    assert_eq!(responses[0]["result"]["serverInfo"]["name"], "unified-toolbox");

    let tools = responses[1]["result"]["tools"].as_array().unwrap();
    let names: Vec<&str> = tools.iter().map(|t| t["name"].as_str().unwrap()).collect();
    assert_eq!(
        names,
        vec![
            "slack_list_channels",
            "slack_get_history",
            "slack_get_thread_replies",
            "slack_list_users",
            "notion_search",
            "notion_get_page",
            "notion_get_database",
            "n8n_list_workflows",
            "n8n_get_workflow",
            "n8n_trigger_webhook",
        ]
    );
    assert!(tools.iter().all(|t| t["inputSchema"]["type"] == "object"));
}

#[tokio::test]
async fn test_slack_history_forwards_arguments() {
    let mock = MockServer::start_async().await;
    let body = json!({"ok": true, "messages": [{"ts": "1.0", "text": "hi"}]});
    let history = mock
        .mock_async(|when, then| {
            when.method(GET)
                .path("/slack/conversations.history")
                .query_param("channel", "C9")
                .query_param("limit", "3");
            then.status(200).json_body(body.clone());
        })
        .await;

    let responses = exchange(
        &server_for(&mock),
        &[json!({
            "jsonrpc": "2.0", "id": 7, "method": "tools/call",
            "params": {"name": "slack_get_history", "arguments": {"channelId": "C9", "limit": 3}}
        })],
    )
    .await;

    history.assert_async().await;
    assert_eq!(responses[0]["id"], 7);
    assert!(responses[0]["result"].get("isError").is_none());
    assert_eq!(tool_text(&responses[0]), serde_json::to_string(&body).unwrap());
}

#[tokio::test]
async fn test_notion_search_and_n8n_trigger() {
    let mock = MockServer::start_async().await;
    let search = mock
        .mock_async(|when, then| {
            when.method(POST).path("/notion/search").json_body(json!({"query": "okr"}));
            then.status(200).json_body(json!({"results": []}));
        })
        .await;
    let hook = mock
        .mock_async(|when, then| {
            when.method(POST).path("/webhook/deploy").json_body(json!({"env": "prod"}));
            then.status(200).body("Workflow was started");
        })
        .await;

    let responses = exchange(
        &server_for(&mock),
        &[
            json!({"jsonrpc": "2.0", "id": 1, "method": "tools/call",
                   "params": {"name": "notion_search", "arguments": {"query": "okr"}}}),
            json!({"jsonrpc": "2.0", "id": 2, "method": "tools/call",
                   "params": {"name": "n8n_trigger_webhook", "arguments": {"webhookId": "deploy", "data": {"env": "prod"}}}}),
        ],
    )
    .await;

    search.assert_async().await;
    hook.assert_async().await;
    assert_eq!(tool_text(&responses[0]), r#"{"results":[]}"#);
    assert_eq!(tool_text(&responses[1]), r#""Workflow was started""#);
}

#[tokio::test]
async fn test_backend_failure_is_error_result() {
    let mock = MockServer::start_async().await;
    mock.mock_async(|when, then| {
        when.method(GET).path("/slack/conversations.list");
        then.status(200).json_body(json!({"ok": false, "error": "invalid_auth"}));
    })
    .await;
    mock.mock_async(|when, then| {
        when.method(GET).path("/api/v1/workflows/404");
        then.status(404).body(r#"{"message":"Not Found"}"#);
    })
    .await;

    let responses = exchange(
        &server_for(&mock),
        &[
            json!({"jsonrpc": "2.0", "id": 1, "method": "tools/call",
                   "params": {"name": "slack_list_channels", "arguments": {}}}),
            json!({"jsonrpc": "2.0", "id": 2, "method": "tools/call",
                   "params": {"name": "n8n_get_workflow", "arguments": {"workflowId": "404"}}}),
        ],
    )
    .await;

    assert_eq!(responses[0]["result"]["isError"], true);
    assert_eq!(
        tool_text(&responses[0]),
        "Slack API error (conversations.list): invalid_auth"
    );
    assert_eq!(responses[1]["result"]["isError"], true);
    assert!(tool_text(&responses[1]).starts_with("n8n API error (404)"));
}

#[tokio::test]
async fn test_unknown_tool_and_bad_arguments() {
    let mock = MockServer::start_async().await;

    let responses = exchange(
        &server_for(&mock),
        &[
            json!({"jsonrpc": "2.0", "id": 1, "method": "tools/call",
                   "params": {"name": "github_list_repos", "arguments": {}}}),
            json!({"jsonrpc": "2.0", "id": 2, "method": "tools/call",
                   "params": {"name": "slack_get_thread_replies", "arguments": {"channelId": "C1"}}}),
        ],
    )
    .await;

    assert_eq!(responses[0]["error"]["code"], -32601);
    assert_eq!(responses[1]["error"]["code"], -32602);
}

#[tokio::test]
async fn test_blank_lines_are_skipped() {
    let mock = MockServer::start_async().await;
    let server = server_for(&mock);

    let input = "\n   \n{\"jsonrpc\":\"2.0\",\"id\":1,\"method\":\"ping\"}\n";
    let mut output = Vec::new();
    server.run(input.as_bytes(), &mut output).await.unwrap();

    let lines: Vec<&str> = std::str::from_utf8(&output).unwrap().lines().collect();
    assert_eq!(lines.len(), 1);
    let response: Value = serde_json::from_str(lines[0]).unwrap();
    assert_eq!(response["result"], json!({}));
}

#[tokio::test]
async fn test_invalid_utf8_line_does_not_stop_server() {
    let mock = MockServer::start_async().await;
    let server = server_for(&mock);

    let mut input = b"\xff\xfe\n".to_vec();
    input.extend_from_slice(b"{\"jsonrpc\":\"2.0\",\"id\":7,\"method\":\"ping\"}\n");
    let mut output = Vec::new();
    server.run(input.as_slice(), &mut output).await.unwrap();

    let responses: Vec<Value> = std::str::from_utf8(&output)
        .unwrap()
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(responses.len(), 2);
    assert_eq!(responses[0]["error"]["code"], -32700);
    assert!(responses[0]["id"].is_null());
    assert_eq!(responses[1]["id"], 7);
    assert_eq!(responses[1]["result"], json!({}));
}
