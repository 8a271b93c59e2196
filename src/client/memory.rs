//! In-memory session adapter — deterministic stand-in for real servers.
//!
//! Used by unit tests and the demo walkthrough. Behavior is scripted at
//! construction: canned tool listings, scripted failures, and optional
//! response delays for timeout coverage.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;

use super::errors::McpError;
use super::session::{ServerSession, SessionConnector};
use super::types::{ServerConfig, ToolDescriptor};

// ─── InMemorySession ─────────────────────────────────────────────────────────

/// A scripted session that never leaves the process.
#[derive(Debug, Clone)]
pub struct InMemorySession {
    name: String,
    tools: Vec<ToolDescriptor>,
    init_error: Option<String>,
    listing_error: Option<String>,
    call_error: Option<String>,
    response_delay: Option<Duration>,
}

impl InMemorySession {
    /// A session with no tools and no scripted failures.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            tools: Vec::new(),
            init_error: None,
            listing_error: None,
            call_error: None,
            response_delay: None,
        }
    }

    /// Canned tool listing.
    pub fn with_tools(mut self, tools: Vec<ToolDescriptor>) -> Self {
        self.tools = tools;
        self
    }

    /// Fail the initialization handshake.
    pub fn with_init_error(mut self, reason: &str) -> Self {
        self.init_error = Some(reason.to_string());
        self
    }

    /// Fail every tool listing, and therefore every health probe.
    pub fn with_listing_error(mut self, reason: &str) -> Self {
        self.listing_error = Some(reason.to_string());
        self
    }

    /// Fail every tool call.
    pub fn with_call_error(mut self, reason: &str) -> Self {
        self.call_error = Some(reason.to_string());
        self
    }

    /// Sleep before answering any request.
    pub fn with_response_delay(mut self, delay: Duration) -> Self {
        self.response_delay = Some(delay);
        self
    }

    async fn simulate_latency(&self) {
        if let Some(delay) = self.response_delay {
            tokio::time::sleep(delay).await;
        }
    }
}

#[async_trait]
impl ServerSession for InMemorySession {
    async fn initialize(&mut self) -> Result<(), McpError> {
        match &self.init_error {
            Some(reason) => Err(McpError::InitFailed {
                name: self.name.clone(),
                reason: reason.clone(),
            }),
            None => Ok(()),
        }
    }

    async fn list_tools(&mut self) -> Result<Vec<ToolDescriptor>, McpError> {
        self.simulate_latency().await;
        match &self.listing_error {
            Some(reason) => Err(McpError::SessionError {
                server: self.name.clone(),
                reason: reason.clone(),
            }),
            None => Ok(self.tools.clone()),
        }
    }

    async fn call_tool(
        &mut self,
        tool_name: &str,
        arguments: serde_json::Value,
    ) -> Result<serde_json::Value, McpError> {
        self.simulate_latency().await;
        match &self.call_error {
            Some(reason) => Err(McpError::SessionError {
                server: self.name.clone(),
                reason: reason.clone(),
            }),
            None => Ok(json!({ "tool": tool_name, "echo": arguments })),
        }
    }
}

// ─── InMemoryConnector ───────────────────────────────────────────────────────

/// Hands out clones of registered scripted sessions, keyed by server name.
#[derive(Debug, Default)]
pub struct InMemoryConnector {
    sessions: HashMap<String, InMemorySession>,
    refusals: HashMap<String, String>,
}

impl InMemoryConnector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a scripted session under its own name.
    pub fn register(mut self, session: InMemorySession) -> Self {
        self.sessions.insert(session.name.clone(), session);
        self
    }

    /// Refuse connections for `name` with `reason`.
    pub fn refuse(mut self, name: &str, reason: &str) -> Self {
        self.refusals.insert(name.to_string(), reason.to_string());
        self
    }
}

#[async_trait]
impl SessionConnector for InMemoryConnector {
    async fn connect(&self, config: &ServerConfig) -> Result<Box<dyn ServerSession>, McpError> {
        if let Some(reason) = self.refusals.get(&config.name) {
            return Err(McpError::ConnectFailed {
                name: config.name.clone(),
                reason: reason.clone(),
            });
        }

        match self.sessions.get(&config.name) {
            Some(session) => Ok(Box::new(session.clone())),
            None => Err(McpError::ConnectFailed {
                name: config.name.clone(),
                reason: "no scripted session registered under this name".to_string(),
            }),
        }
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
