//! MCP server: JSON-RPC dispatch and the stdio transport

use crate::config::Config;
use crate::error::{Result, ScoutError};
use crate::http::{HttpExecutor, ReqwestExecutor};
use crate::mcp::errors::McpError;
use crate::mcp::tools::ToolDispatcher;
use crate::mcp::types::{McpRequest, McpResponse, ToolCall, PROTOCOL_VERSION};
use crate::openapi::EndpointAnalyzer;
use crate::utils::JsonCodec;
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, error, info, warn};

/// MCP server exposing the API discovery tools
#[derive(Clone)]
pub struct McpServer {
    tools: ToolDispatcher,
    server_name: String,
}

impl McpServer {
    /// Create a server around an existing executor
    pub fn new(config: &Config, executor: Arc<dyn HttpExecutor>) -> Self {
        let analyzer = EndpointAnalyzer::new(
            executor,
            JsonCodec::new(),
            config.discovery.spec_paths.clone(),
        );
        Self {
            tools: ToolDispatcher::new(analyzer),
            server_name: config.server.name.clone(),
        }
    }

    /// Create a server backed by a real HTTP client
    pub fn from_config(config: &Config) -> Result<Self> {
        let executor = ReqwestExecutor::new(&config.http)?;
        Ok(Self::new(config, Arc::new(executor)))
    }

    pub fn server_name(&self) -> &str {
        &self.server_name
    }

    /// Capabilities and identity returned from `initialize`
    fn initialize_result(&self) -> Value {
        json!({
            "protocolVersion": PROTOCOL_VERSION,
            "capabilities": {
                "tools": {}
            },
            "serverInfo": {
                "name": self.server_name,
                "version": crate::VERSION
            }
        })
    }

    /// Handle one decoded request. `None` means nothing is written back.
    pub async fn handle_mcp_request(&self, request: McpRequest) -> Result<Option<String>> {
        debug!("Handling MCP method: {}", request.method);

        if request.is_notification() {
            if request.method == "initialized" || request.method.starts_with("notifications/") {
                debug!("Received notification: {}", request.method);
                return Ok(None);
            }
            warn!("Request '{}' has no ID", request.method);
            return self
                .create_error_response(None, McpError::invalid_request("Request must have an ID".to_string()))
                .map(Some);
        }
        let id = request.id.clone().unwrap_or(Value::Null);

        let response = match request.method.as_str() {
            "initialize" => {
                info!("MCP client initializing");
                self.create_success_response(id, self.initialize_result())
            }
            "initialized" | "notifications/initialized" => return Ok(None),
            "ping" => self.create_success_response(id, json!({})),
            "tools/list" => {
                let tools = self.tools.list_tools();
                self.create_success_response(id, json!({ "tools": tools }))
            }
            "tools/call" => {
                let params = request.params.unwrap_or_else(|| json!({}));
                match serde_json::from_value::<ToolCall>(params) {
                    Ok(tool_call) => match self.tools.call_tool(&tool_call).await {
                        Ok(result) => self.create_success_response(id, serde_json::to_value(result)?),
                        Err(e) => self.create_error_response(Some(id), e),
                    },
                    Err(e) => self.create_error_response(
                        Some(id),
                        McpError::invalid_params(format!("Invalid tool call parameters: {}", e)),
                    ),
                }
            }
            other => {
                warn!("Unknown MCP method: {}", other);
                self.create_error_response(Some(id), McpError::method_not_found(other.to_string()))
            }
        }?;

        Ok(Some(response))
    }

    /// Decode and handle one line of JSON-RPC text
    pub async fn handle_message(&self, message: &str) -> Result<Option<String>> {
        let request: McpRequest = match serde_json::from_str(message) {
            Ok(request) => request,
            Err(e) => {
                warn!("Failed to parse JSON-RPC message: {}", e);
                return self
                    .create_error_response(None, McpError::parse_error(format!("Invalid JSON: {}", e)))
                    .map(Some);
            }
        };

        self.handle_mcp_request(request).await
    }

    fn create_success_response(&self, id: Value, result: Value) -> Result<String> {
        Ok(serde_json::to_string(&McpResponse::success(id, result))?)
    }

    fn create_error_response(&self, id: Option<Value>, error: McpError) -> Result<String> {
        Ok(serde_json::to_string(&McpResponse::error(id, error))?)
    }

    /// Response for a failure that escaped request handling; the error category travels in `data`
    fn create_failure_response(&self, error: ScoutError) -> Result<String> {
        self.create_error_response(None, McpError::from(error))
    }

    /// Serve newline-delimited JSON-RPC until the reader reaches EOF
    pub async fn serve<R, W>(&self, mut reader: R, mut writer: W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut line = String::new();

        loop {
            line.clear();
            if reader.read_line(&mut line).await? == 0 {
                info!("stdin closed, shutting down stdio mode");
                break;
            }

            let trimmed_line = line.trim();
            if trimmed_line.is_empty() {
                continue;
            }

            let response = match self.handle_message(trimmed_line).await {
                Ok(response) => response,
                Err(e) => {
                    error!("Error handling stdio message: {}", e);
                    Some(self.create_failure_response(e)?)
                }
            };

            if let Some(response) = response {
                writer.write_all(response.as_bytes()).await?;
                writer.write_all(b"\n").await?;
                writer.flush().await?;
            }
        }

        Ok(())
    }

    /// Run over the process's stdin and stdout
    pub async fn run_stdio(&self) -> Result<()> {
        info!("{} stdio mode ready - waiting for JSON-RPC messages", self.server_name);
        let reader = BufReader::new(tokio::io::stdin());
        self.serve(reader, tokio::io::stdout()).await
    }

    /// Read a single request from stdin, answer it and return
    pub async fn run_single(&self) -> Result<()> {
        info!("Single-shot MCP client ready - reading request from stdin");

        let mut reader = BufReader::new(tokio::io::stdin());
        let mut line = String::new();
        if reader.read_line(&mut line).await? == 0 || line.trim().is_empty() {
            return Err(ScoutError::validation("No request received on stdin"));
        }

        let response = match self.handle_message(line.trim()).await {
            Ok(response) => response,
            Err(e) => {
                error!("Error processing MCP request: {}", e);
                Some(self.create_failure_response(e)?)
            }
        };

        if let Some(response) = response {
            let mut stdout = tokio::io::stdout();
            stdout.write_all(response.as_bytes()).await?;
            stdout.write_all(b"\n").await?;
            stdout.flush().await?;
        }
        info!("MCP request processed successfully");
        Ok(())
    }
}
