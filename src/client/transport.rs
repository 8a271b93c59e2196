//! SDK-backed session adapter.
//!
//! Wraps the `rmcp` client role: the SDK owns protocol framing and the
//! server child process, and this adapter maps between SDK types and the
//! hub's session capability. Dropping the session tears the channel (and
//! the child process) down.

use async_trait::async_trait;
use rmcp::model::{CallToolRequestParam, ClientInfo};
use rmcp::service::RunningService;
use rmcp::transport::TokioChildProcess;
use rmcp::RoleClient;
use tokio::process::Command;

use super::errors::McpError;
use super::session::{ServerSession, SessionConnector};
use super::types::{ServerConfig, ToolDescriptor};

// ─── RmcpSession ─────────────────────────────────────────────────────────────

/// A live session over the rmcp SDK.
pub struct RmcpSession {
    server_name: String,
    service: RunningService<RoleClient, ClientInfo>,
}

impl RmcpSession {
    /// Launch the configured server command and complete the MCP handshake.
    pub async fn spawn(config: &ServerConfig) -> Result<Self, McpError> {
        let mut cmd = Command::new(&config.command);
        cmd.args(&config.args);
        for (key, value) in &config.env {
            cmd.env(key, value);
        }

        let transport = TokioChildProcess::new(cmd).map_err(|e| McpError::ConnectFailed {
            name: config.name.clone(),
            reason: e.to_string(),
        })?;

        let service = rmcp::serve_client(ClientInfo::default(), transport)
            .await
            .map_err(|e| McpError::InitFailed {
                name: config.name.clone(),
                reason: e.to_string(),
            })?;

        tracing::debug!(
            server = %config.name,
            command = %config.command,
            "rmcp session established"
        );

        Ok(Self {
            server_name: config.name.clone(),
            service,
        })
    }

    fn session_error(&self, reason: String) -> McpError {
        McpError::SessionError {
            server: self.server_name.clone(),
            reason,
        }
    }
}

#[async_trait]
impl ServerSession for RmcpSession {
    async fn initialize(&mut self) -> Result<(), McpError> {
        // The initialize exchange already ran inside `serve_client`.
        Ok(())
    }

    async fn list_tools(&mut self) -> Result<Vec<ToolDescriptor>, McpError> {
        let listing = self
            .service
            .list_tools(None)
            .await
            .map_err(|e| self.session_error(e.to_string()))?;

        Ok(listing
            .tools
            .into_iter()
            .map(|tool| ToolDescriptor {
                name: tool.name.to_string(),
                description: tool.description.map(|d| d.to_string()),
            })
            .collect())
    }

    async fn call_tool(
        &mut self,
        tool_name: &str,
        arguments: serde_json::Value,
    ) -> Result<serde_json::Value, McpError> {
        let arguments = arguments.as_object().cloned();

        let response = self
            .service
            .call_tool(CallToolRequestParam {
                name: tool_name.to_string().into(),
                arguments,
            })
            .await
            .map_err(|e| self.session_error(e.to_string()))?;

        let is_error = response.is_error.unwrap_or(false);
        let content = serde_json::to_value(&response.content)
            .map_err(|e| self.session_error(e.to_string()))?;

        if is_error {
            let reason = content_text(&content)
                .unwrap_or_else(|| "tool reported an error".to_string());
            return Err(self.session_error(reason));
        }

        // Servers that emit structured output put the payload there; the
        // content array is the fallback.
        if let Some(structured) = response.structured_content {
            return Ok(structured);
        }

        Ok(content)
    }
}

/// Join the text parts of a serialized content array.
fn content_text(content: &serde_json::Value) -> Option<String> {
    let parts: Vec<&str> = content
        .as_array()?
        .iter()
        .filter_map(|part| part.get("text").and_then(|t| t.as_str()))
        .collect();

    if parts.is_empty() {
        None
    } else {
        Some(parts.join("\n"))
    }
}

// ─── RmcpConnector ───────────────────────────────────────────────────────────

/// Establishes rmcp-backed sessions by launching the configured command.
#[derive(Debug, Default)]
pub struct RmcpConnector;

impl RmcpConnector {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl SessionConnector for RmcpConnector {
    async fn connect(&self, config: &ServerConfig) -> Result<Box<dyn ServerSession>, McpError> {
        let session = RmcpSession::spawn(config).await?;
        Ok(Box::new(session))
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
