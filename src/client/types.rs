//! Shared types for the MCP hub client.
//!
//! Server configuration, tool descriptors, and the normalized tool call
//! result shape.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

// ─── Server Configuration ────────────────────────────────────────────────────

/// Connection configuration for one named server.
///
/// Immutable once constructed; the registry stores it alongside the session
/// it was used to establish.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Unique server name; the registry key.
    pub name: String,
    pub command: String,
    #[serde(default)]
    pub args: Vec<String>,
    #[serde(default)]
    pub env: HashMap<String, String>,
}

impl ServerConfig {
    /// Create a config with no environment overrides.
    pub fn new(name: &str, command: &str, args: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            command: command.to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
            env: HashMap::new(),
        }
    }
}

/// Definition entry in a servers file; the server name is the map key.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerDefinition {
    pub command: String,
    #[serde(default)]
    pub args: Vec<String>,
    #[serde(default)]
    pub env: HashMap<String, String>,
}

/// Top-level MCP servers configuration file.
#[derive(Debug, Clone, Deserialize)]
pub struct McpServersConfig {
    pub servers: HashMap<String, ServerDefinition>,
}

impl McpServersConfig {
    /// Flatten into per-server configs, sorted by name so connection order
    /// is deterministic.
    pub fn into_server_configs(self) -> Vec<ServerConfig> {
        let mut configs: Vec<ServerConfig> = self
            .servers
            .into_iter()
            .map(|(name, def)| ServerConfig {
                name,
                command: def.command,
                args: def.args,
                env: def.env,
            })
            .collect();
        configs.sort_by(|a, b| a.name.cmp(&b.name));
        configs
    }
}

// ─── Tool Types ──────────────────────────────────────────────────────────────

/// A tool exposed by a connected server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolDescriptor {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Result of a tool call dispatch.
///
/// Exactly one of `result` and `error` is set, matching `success`.
#[derive(Debug, Clone, Serialize)]
pub struct ToolCallResult {
    pub tool_name: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub execution_time_ms: u64,
}

// ─── Tests ───────────────────────────────────────────────────────────────────
