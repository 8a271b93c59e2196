//! MCP hub client — connection management and tool dispatch.
//!
//! `McpClient` pairs the session registry with dispatch operations that
//! normalize per-server successes and failures into uniform result shapes.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use super::errors::McpError;
use super::registry::SessionRegistry;
use super::session::{ServerSession, SessionConnector};
use super::types::{ServerConfig, ToolCallResult, ToolDescriptor};

// ─── Constants ───────────────────────────────────────────────────────────────

/// Default deadline for a single session call.
const DEFAULT_CALL_TIMEOUT: Duration = Duration::from_secs(30);

// ─── McpClient ───────────────────────────────────────────────────────────────

/// High-level MCP client that manages named server sessions and routes
/// tool-listing and tool-invocation calls to them.
pub struct McpClient {
    /// Session and config state, keyed by server name.
    pub registry: SessionRegistry,
    /// Deadline applied to every session call.
    call_timeout: Duration,
}

impl McpClient {
    /// Create a client that establishes sessions through `connector`.
    pub fn new(connector: Box<dyn SessionConnector>) -> Self {
        Self {
            registry: SessionRegistry::new(connector),
            call_timeout: DEFAULT_CALL_TIMEOUT,
        }
    }

    /// Set the per-call deadline.
    pub fn set_call_timeout(&mut self, timeout: Duration) {
        self.call_timeout = timeout;
    }

    /// Deadline applied to every session call.
    pub fn call_timeout(&self) -> Duration {
        self.call_timeout
    }

    // ─── Connection Management ───────────────────────────────────────────

    /// Connect to the server described by `config`.
    ///
    /// See [`SessionRegistry::connect`] for the install/overwrite contract.
    pub async fn connect(&mut self, config: ServerConfig) -> Result<(), McpError> {
        self.registry.connect(config).await
    }

    /// Drop all sessions. Idempotent.
    pub fn disconnect_all(&mut self) {
        self.registry.disconnect_all();
    }

    /// Names of all connected servers.
    pub fn connected_servers(&self) -> Vec<String> {
        self.registry.list_connected()
    }

    // ─── Tool Dispatch ───────────────────────────────────────────────────

    /// List tools, keyed by server.
    ///
    /// With `Some(name)`: queries that server if connected; an unknown name
    /// yields an empty map with no entry at all (silent no-op, unlike
    /// `call_tool`). With `None`: queries every connected server
    /// concurrently. A server whose query fails gets an empty tool list;
    /// the others are unaffected.
    pub async fn list_tools(
        &mut self,
        server_name: Option<&str>,
    ) -> HashMap<String, Vec<ToolDescriptor>> {
        let timeout = self.call_timeout;
        let mut tools_by_server = HashMap::new();

        match server_name {
            Some(name) => {
                let Some(session) = self.registry.get_session(name) else {
                    return tools_by_server;
                };
                let tools = query_tools(name, session, timeout).await;
                tools_by_server.insert(name.to_string(), tools);
            }
            None => {
                let queries = self
                    .registry
                    .sessions_iter_mut()
                    .map(|(name, session)| async move {
                        (name.clone(), query_tools(name, session.as_mut(), timeout).await)
                    });
                for (name, tools) in futures::future::join_all(queries).await {
                    tools_by_server.insert(name, tools);
                }
            }
        }

        tools_by_server
    }

    /// Invoke `tool_name` on `server_name` with `arguments`.
    ///
    /// Always returns a result shape: success carries the raw tool output,
    /// while unknown servers, session failures, and timeouts all come back
    /// as `success: false` with a message. Session failures never propagate
    /// past this boundary.
    pub async fn call_tool(
        &mut self,
        server_name: &str,
        tool_name: &str,
        arguments: serde_json::Value,
    ) -> ToolCallResult {
        let start = Instant::now();
        let timeout = self.call_timeout;

        let Some(session) = self.registry.get_session(server_name) else {
            let e = McpError::NotConnected {
                name: server_name.to_string(),
            };
            return ToolCallResult {
                tool_name: tool_name.to_string(),
                success: false,
                result: None,
                error: Some(e.to_string()),
                execution_time_ms: start.elapsed().as_millis() as u64,
            };
        };

        let outcome = tokio::time::timeout(timeout, session.call_tool(tool_name, arguments))
            .await
            .unwrap_or_else(|_| {
                Err(McpError::Timeout {
                    server: server_name.to_string(),
                    timeout_ms: timeout.as_millis() as u64,
                })
            });

        let elapsed = start.elapsed().as_millis() as u64;

        match outcome {
            Ok(result) => ToolCallResult {
                tool_name: tool_name.to_string(),
                success: true,
                result: Some(result),
                error: None,
                execution_time_ms: elapsed,
            },
            Err(e) => {
                tracing::warn!(
                    server = %server_name,
                    tool = %tool_name,
                    error = %e,
                    "tool call failed"
                );
                ToolCallResult {
                    tool_name: tool_name.to_string(),
                    success: false,
                    result: None,
                    error: Some(e.to_string()),
                    execution_time_ms: elapsed,
                }
            }
        }
    }
}

/// Query one session's tool listing, folding failures into an empty list.
async fn query_tools(
    name: &str,
    session: &mut dyn ServerSession,
    timeout: Duration,
) -> Vec<ToolDescriptor> {
    match tokio::time::timeout(timeout, session.list_tools()).await {
        Ok(Ok(tools)) => tools,
        Ok(Err(e)) => {
            tracing::warn!(server = %name, error = %e, "failed to list tools");
            Vec::new()
        }
        Err(_) => {
            tracing::warn!(
                server = %name,
                timeout_ms = timeout.as_millis() as u64,
                "tool listing timed out"
            );
            Vec::new()
        }
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
