//! Session capability traits.
//!
//! `ServerSession` is the channel to one connected server; `SessionConnector`
//! establishes sessions from configs. Protocol framing and server process
//! management stay behind these traits: `transport` provides the SDK-backed
//! adapter, `memory` the in-process double.

use async_trait::async_trait;

use super::errors::McpError;
use super::types::{ServerConfig, ToolDescriptor};

/// An established bidirectional channel to one MCP server.
///
/// Methods take `&mut self`: a session processes at most one outstanding
/// request at a time. Dropping the session releases the underlying channel.
#[async_trait]
pub trait ServerSession: Send {
    /// Run the protocol initialization handshake.
    async fn initialize(&mut self) -> Result<(), McpError>;

    /// List the tools the server exposes.
    async fn list_tools(&mut self) -> Result<Vec<ToolDescriptor>, McpError>;

    /// Invoke a named tool and return its raw output.
    async fn call_tool(
        &mut self,
        tool_name: &str,
        arguments: serde_json::Value,
    ) -> Result<serde_json::Value, McpError>;
}

/// Establishes sessions from server configurations.
#[async_trait]
pub trait SessionConnector: Send + Sync {
    /// Open a channel to the server described by `config`.
    ///
    /// # Errors
    ///
    /// Returns [`McpError::ConnectFailed`] when the channel cannot be
    /// established.
    async fn connect(&self, config: &ServerConfig) -> Result<Box<dyn ServerSession>, McpError>;
}
