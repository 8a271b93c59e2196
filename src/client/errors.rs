//! MCP hub error types.

use thiserror::Error;

/// Errors that can occur during MCP hub operations.
#[derive(Debug, Error)]
pub enum McpError {
    /// Session establishment failed before the handshake.
    #[error("failed to connect to server '{name}': {reason}")]
    ConnectFailed {
        name: String,
        reason: String,
    },

    /// The initialization handshake failed.
    #[error("server '{name}' initialization failed: {reason}")]
    InitFailed {
        name: String,
        reason: String,
    },

    /// Request/response exchange with a live session failed.
    #[error("session error for server '{server}': {reason}")]
    SessionError {
        server: String,
        reason: String,
    },

    /// The named server has no active session.
    #[error("server '{name}' not connected")]
    NotConnected {
        name: String,
    },

    /// A session call exceeded the configured deadline.
    #[error("call to server '{server}' timed out after {timeout_ms}ms")]
    Timeout {
        server: String,
        timeout_ms: u64,
    },

    /// Configuration error (unreadable or malformed servers file).
    #[error("config error: {reason}")]
    ConfigError {
        reason: String,
    },
}
