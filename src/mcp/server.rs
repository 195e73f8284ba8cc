use std::sync::Arc;
use serde_json::{json, Value};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use crate::errors::AegisError;
use crate::models::{IntelligenceReport, ScanInput};
use crate::providers::SecurityProvider;
use super::protocol::{JsonRpcError, JsonRpcRequest, JsonRpcResponse, JSONRPC_VERSION};
use tracing::{debug, info, warn};

pub const SERVER_NAME: &str = "aegis-security-mcp";
const PROTOCOL_VERSION: &str = "2024-11-05";
const SCAN_TOOL: &str = "scan_identity";

/// Line-delimited JSON-RPC server exposing identity scans as an MCP tool.
pub struct McpServer {
    provider: Arc<dyn SecurityProvider>,
}

impl McpServer {
    pub fn new(provider: Arc<dyn SecurityProvider>) -> Self {
        Self { provider }
    }

    /// Reads requests until EOF, writing one response line per request.
    pub async fn serve<R, W>(&self, reader: R, mut writer: W) -> Result<(), AegisError>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        info!(server = SERVER_NAME, provider = self.provider.provider_name(), "MCP server listening on stdio");
        let mut lines = reader.lines();
        while let Some(line) = lines.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }
            if let Some(response) = self.handle_line(&line).await {
                let mut out = serde_json::to_string(&response)?;
                out.push('\n');
                writer.write_all(out.as_bytes()).await?;
                writer.flush().await?;
            }
        }
        debug!("MCP input closed");
        Ok(())
    }

    pub async fn handle_line(&self, line: &str) -> Option<JsonRpcResponse> {
        let request: JsonRpcRequest = match serde_json::from_str(line) {
            Ok(req) => req,
            Err(e) => {
                warn!(error = %e, "Unparsable MCP message");
                return Some(JsonRpcResponse::error(JsonRpcError::parse_error(e.to_string()), Value::Null));
            }
        };

        let result = if request.jsonrpc != JSONRPC_VERSION {
            Err(JsonRpcError::invalid_request("jsonrpc must be \"2.0\""))
        } else {
            self.dispatch(&request).await
        };

        let id = request.id?;
        Some(match result {
            Ok(value) => JsonRpcResponse::success(value, id),
            Err(error) => JsonRpcResponse::error(error, id),
        })
    }

    async fn dispatch(&self, request: &JsonRpcRequest) -> Result<Value, JsonRpcError> {
        debug!(method = %request.method, "MCP request");
        match request.method.as_str() {
            "initialize" => Ok(json!({
                "protocolVersion": PROTOCOL_VERSION,
                "serverInfo": { "name": SERVER_NAME, "version": env!("CARGO_PKG_VERSION") },
                "capabilities": { "tools": {} }
            })),
            "ping" => Ok(json!({})),
            "tools/list" => Ok(json!({ "tools": [scan_tool_definition()] })),
            "tools/call" => self.call_tool(request.params.as_ref()).await,
            method if method.starts_with("notifications/") => Ok(Value::Null),
            other => Err(JsonRpcError::method_not_found(other)),
        }
    }

    async fn call_tool(&self, params: Option<&Value>) -> Result<Value, JsonRpcError> {
        let params = params.ok_or_else(|| JsonRpcError::invalid_params("Missing params"))?;
        let name = params["name"].as_str().unwrap_or_default();
        if name != SCAN_TOOL {
            return Err(JsonRpcError::invalid_params(format!("Tool not found: {}", name)));
        }
        let identity = params["arguments"]["identity"]
            .as_str()
            .map(str::trim)
            .filter(|i| !i.is_empty())
            .ok_or_else(|| JsonRpcError::invalid_params("identity is required"))?;

        let report = self
            .provider
            .scan_identity(&ScanInput::email(identity))
            .await
            .map_err(|e| JsonRpcError::internal_error(e.to_string()))?;

        Ok(json!({
            "content": [{ "type": "text", "text": format_scan_text(identity, &report) }]
        }))
    }
}

fn scan_tool_definition() -> Value {
    json!({
        "name": SCAN_TOOL,
        "description": "Scans an email for security breaches using Aegis Protocol.",
        "inputSchema": {
            "type": "object",
            "properties": { "identity": { "type": "string" } },
            "required": ["identity"]
        }
    })
}

fn format_scan_text(identity: &str, report: &IntelligenceReport) -> String {
    let status = if report.risk_score >= 70 {
        "CRITICAL THREAT DETECTED."
    } else if report.risk_score >= 30 {
        "ELEVATED EXPOSURE."
    } else {
        "NO SIGNIFICANT EXPOSURE."
    };
    format!(
        "[AEGIS MCP] Scan Target: {}\nStatus: {}\nRisk Score: {}/100\nBreaches: {}\nSummary: {}\nAction: Trigger remediation workflow.",
        identity, status, report.risk_score, report.found_breaches, report.summary
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::Pacing;
    use crate::providers::SimulatedProvider;

    fn server() -> McpServer {
        McpServer::new(Arc::new(SimulatedProvider::new(Pacing::disabled())))
    }

    #[tokio::test]
    async fn test_initialize_reports_server_name() {
        let resp = server()
            .handle_line(r#"{"jsonrpc":"2.0","id":1,"method":"initialize","params":{}}"#)
            .await
            .unwrap();
        assert_eq!(resp.result.unwrap()["serverInfo"]["name"], SERVER_NAME);
    }

    #[tokio::test]
    async fn test_tools_list() {
        let resp = server()
            .handle_line(r#"{"jsonrpc":"2.0","id":2,"method":"tools/list"}"#)
            .await
            .unwrap();
        let result = resp.result.unwrap();
        assert_eq!(result["tools"][0]["name"], SCAN_TOOL);
        assert_eq!(result["tools"][0]["inputSchema"]["required"][0], "identity");
    }

    #[tokio::test]
    async fn test_tools_call_scans_identity() {
        let resp = server()
            .handle_line(r#"{"jsonrpc":"2.0","id":3,"method":"tools/call","params":{"name":"scan_identity","arguments":{"identity":"a@b.com"}}}"#)
            .await
            .unwrap();
        let text = resp.result.unwrap()["content"][0]["text"].as_str().unwrap().to_string();
        assert!(text.starts_with("[AEGIS MCP] Scan Target: a@b.com"));
        assert!(text.contains("CRITICAL THREAT DETECTED"));
    }

    #[tokio::test]
    async fn test_error_codes() {
        let s = server();
        let unknown_tool = s
            .handle_line(r#"{"jsonrpc":"2.0","id":4,"method":"tools/call","params":{"name":"wipe_disk"}}"#)
            .await
            .unwrap();
        assert_eq!(unknown_tool.error.unwrap().code, JsonRpcError::INVALID_PARAMS);

        let unknown_method = s
            .handle_line(r#"{"jsonrpc":"2.0","id":5,"method":"resources/list"}"#)
            .await
            .unwrap();
        assert_eq!(unknown_method.error.unwrap().code, JsonRpcError::METHOD_NOT_FOUND);

        let garbage = s.handle_line("{not json").await.unwrap();
        assert_eq!(garbage.error.unwrap().code, JsonRpcError::PARSE_ERROR);
        assert_eq!(garbage.id, Value::Null);
    }

    #[tokio::test]
    async fn test_notifications_get_no_response() {
        let resp = server()
            .handle_line(r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#)
            .await;
        assert!(resp.is_none());
    }

    #[tokio::test]
    async fn test_serve_over_buffers() {
        let input = b"{\"jsonrpc\":\"2.0\",\"id\":1,\"method\":\"ping\"}\n\n{\"jsonrpc\":\"2.0\",\"method\":\"notifications/initialized\"}\n";
        let mut output = Vec::new();
        server().serve(&input[..], &mut output).await.unwrap();
        let text = String::from_utf8(output).unwrap();
        assert_eq!(text.lines().count(), 1);
        assert!(text.contains("\"id\":1"));
    }
}
