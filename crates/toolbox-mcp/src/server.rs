//! MCP server implementation

use serde::Serialize;
use serde_json::{json, Value};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use toolbox_sdk::Clients;
use tracing::{debug, error, info, warn};

use crate::error::McpError;
use crate::protocol::*;
use crate::tools;

/// MCP Server
///
/// Handles Model Context Protocol requests over a line-delimited stream,
/// normally stdin/stdout.
pub struct McpServer {
    clients: Clients,
}

impl McpServer {
    /// Create a new MCP server around the service clients
    pub fn new(clients: Clients) -> Self {
        Self { clients }
    }

    /// Run the MCP server on stdin/stdout until stdin closes
    pub async fn run_stdio(&self) -> Result<(), McpError> {
        let stdin = tokio::io::BufReader::new(tokio::io::stdin());
        let stdout = tokio::io::stdout();
        self.run(stdin, stdout).await
    }

    /// Serve requests from `reader`, writing one response line per request
    pub async fn run<R, W>(&self, mut reader: R, mut writer: W) -> Result<(), McpError>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        info!("MCP server started");

        let mut buf = Vec::new();
        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf).await? == 0 {
                break;
            }

            let response = match std::str::from_utf8(&buf) {
                Ok(line) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }
                    debug!("Received request: {}", line);
                    self.handle_line(line).await
                }
                Err(e) => {
                    error!("Request is not valid UTF-8: {}", e);
                    Some(error_value(None, -32700, format!("Parse error: {}", e)))
                }
            };

            if let Some(response) = response {
                self.write_response(&mut writer, &response).await?;
            }
        }

        info!("MCP server stopped");
        Ok(())
    }

    /// Handle one raw message; `None` means nothing is sent back
    pub async fn handle_line(&self, line: &str) -> Option<Value> {
        let message: Value = match serde_json::from_str(line) {
            Ok(message) => message,
            Err(e) => {
                error!("Failed to parse request: {}", e);
                return Some(error_value(None, -32700, format!("Parse error: {}", e)));
            }
        };

        // valid JSON but not a request: answer -32600 with whatever id it carried
        let id = message.get("id").cloned();
        let request: JsonRpcRequest = match serde_json::from_value(message) {
            Ok(req) => req,
            Err(e) => {
                warn!("Invalid request: {}", e);
                let err = McpError::InvalidRequest(e.to_string());
                return Some(error_value(id, err.error_code(), err.to_string()));
            }
        };

        if request.is_notification() {
            debug!("Notification: {}", request.method);
            return None;
        }

        Some(self.handle_request(request).await)
    }

    /// Handle a JSON-RPC request
    async fn handle_request(&self, request: JsonRpcRequest) -> Value {
        let id = request.id.clone();

        if request.jsonrpc != "2.0" {
            let err = McpError::InvalidRequest(format!("Unsupported jsonrpc version: {}", request.jsonrpc));
            return error_value(id, err.error_code(), err.to_string());
        }

        let result = match request.method.as_str() {
            "initialize" => to_value(self.handle_initialize(&request.params)),
            "ping" => Ok(json!({})),
            "tools/list" => to_value(ToolListResponse {
                tools: tools::definitions(),
            }),
            "tools/call" => self.handle_tool_call(request.params).await,
            other => Err(McpError::MethodNotFound(other.to_string())),
        };

        match result {
            Ok(value) => success_value(id, value),
            Err(e) => {
                warn!("Request {} failed: {}", request.method, e);
                error_value(id, e.error_code(), e.to_string())
            }
        }
    }

    /// Handle initialize request
    fn handle_initialize(&self, params: &Value) -> InitializeResponse {
        let protocol_version = params
            .get("protocolVersion")
            .and_then(Value::as_str)
            .unwrap_or(DEFAULT_PROTOCOL_VERSION)
            .to_string();

        InitializeResponse {
            protocol_version,
            server_info: ServerInfo {
                name: SERVER_NAME.to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            capabilities: Capabilities {
                tools: ToolsCapability::default(),
            },
        }
    }

    /// Handle tools/call request.
    ///
    /// Backend failures become an `isError` tool result; only protocol-level
    /// problems (unknown tool, bad arguments) are JSON-RPC errors.
    async fn handle_tool_call(&self, params: Value) -> Result<Value, McpError> {
        let params: CallToolParams = serde_json::from_value(params)
            .map_err(|_| McpError::InvalidParams("Missing tool name".to_string()))?;

        let arguments = match params.arguments {
            Some(Value::Null) | None => json!({}),
            Some(args) => args,
        };

        info!("Calling tool {}", params.name);
        let result = match tools::dispatch(&self.clients, &params.name, arguments).await {
            Ok(value) => CallToolResult::text(serde_json::to_string(&value)?),
            Err(McpError::Backend(e)) => {
                warn!("Tool {} failed: {}", params.name, e);
                CallToolResult::error(e.to_string())
            }
            Err(e) => return Err(e),
        };

        to_value(result)
    }

    /// Write response as a single line
    async fn write_response<W>(&self, writer: &mut W, response: &Value) -> Result<(), McpError>
    where
        W: AsyncWrite + Unpin,
    {
        let mut response_str = serde_json::to_string(response)?;
        debug!("Sent response: {}", response_str);
        response_str.push('\n');
        writer.write_all(response_str.as_bytes()).await?;
        writer.flush().await?;
        Ok(())
    }
}

fn to_value<T: Serialize>(value: T) -> Result<Value, McpError> {
    Ok(serde_json::to_value(value)?)
}

fn success_value(id: Option<Value>, result: Value) -> Value {
    // Envelopes only hold Values and Strings.
    serde_json::to_value(JsonRpcResponse::new(id, result)).unwrap_or(Value::Null)
}

fn error_value(id: Option<Value>, code: i32, message: String) -> Value {
    serde_json::to_value(JsonRpcError::new(id, code, message)).unwrap_or(Value::Null)
}

#[cfg(test)]
mod tests {
    use super::*;
    use toolbox_sdk::ToolboxEnv;

    fn offline_server() -> McpServer {
        McpServer::new(Clients::from_env(&ToolboxEnv::default()).unwrap())
    }

    #[tokio::test]
    async fn test_initialize_echoes_protocol_version() {
        let server = offline_server();
        let response = server
            .handle_line(r#"{"jsonrpc":"2.0","id":1,"method":"initialize","params":{"protocolVersion":"2025-03-26"}}"#)
            .await
            .unwrap();

        assert_eq!(response["id"], 1);
        assert_eq!(response["result"]["protocolVersion"], "2025-03-26");
        assert_eq!(response["result"]["serverInfo"]["name"], "unified-toolbox");
        assert_eq!(response["result"]["capabilities"], json!({"tools": {}}));
    }

    #[tokio::test]
    async fn test_initialize_default_version() {
        let server = offline_server();
        let response = server
            .handle_line(r#"{"jsonrpc":"2.0","id":1,"method":"initialize"}"#)
            .await
            .unwrap();
        assert_eq!(response["result"]["protocolVersion"], DEFAULT_PROTOCOL_VERSION);
    }

    #[tokio::test]
    async fn test_notification_gets_no_response() {
        let server = offline_server();
        let response = server
            .handle_line(r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#)
            .await;
        assert!(response.is_none());
    }

    #[tokio::test]
    async fn test_parse_error() {
        let server = offline_server();
        let response = server.handle_line("{not json").await.unwrap();
        assert_eq!(response["error"]["code"], -32700);
        assert!(response["id"].is_null());
    }

    #[tokio::test]
    async fn test_unknown_method() {
        let server = offline_server();
        let response = server
            .handle_line(r#"{"jsonrpc":"2.0","id":"a","method":"resources/list"}"#)
            .await
            .unwrap();
        assert_eq!(response["id"], "a");
        assert_eq!(response["error"]["code"], -32601);
    }

    #[tokio::test]
    async fn test_missing_tool_name() {
        let server = offline_server();
        let response = server
            .handle_line(r#"{"jsonrpc":"2.0","id":2,"method":"tools/call","params":{}}"#)
            .await
            .unwrap();
        assert_eq!(response["error"]["code"], -32602);
    }

    #[tokio::test]
    async fn test_missing_credential_is_tool_error() {
        let server = offline_server();
        let response = server
            .handle_line(r#"{"jsonrpc":"2.0","id":3,"method":"tools/call","params":{"name":"slack_list_users"}}"#)
            .await
            .unwrap();

        assert_eq!(response["result"]["isError"], true);
        let text = response["result"]["content"][0]["text"].as_str().unwrap();
        assert!(text.contains("SLACK_BOT_TOKEN"));
    }

    #[tokio::test]
    async fn test_message_without_method_is_invalid_request() {
        let server = offline_server();
        let response = server
            .handle_line(r#"{"jsonrpc":"2.0","id":5,"result":{}}"#)
            .await
            .unwrap();
        assert_eq!(response["error"]["code"], -32600);
        assert_eq!(response["id"], 5);
    }

    #[tokio::test]
    async fn test_null_id_is_a_request() {
        let server = offline_server();
        let response = server
            .handle_line(r#"{"jsonrpc":"2.0","id":null,"method":"ping"}"#)
            .await
            .unwrap();
        assert!(response["id"].is_null());
        assert_eq!(response["result"], json!({}));
    }

    #[tokio::test]
    async fn test_wrong_jsonrpc_version() {
        let server = offline_server();
        let response = server
            .handle_line(r#"{"jsonrpc":"1.0","id":4,"method":"ping"}"#)
            .await
            .unwrap();
        assert_eq!(response["error"]["code"], -32600);
    }
}
