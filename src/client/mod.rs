//! MCP hub client — named server sessions and tool dispatch.
//!
//! This module handles:
//! - Session establishment and the name→session registry
//! - Tool listing and invocation across connected servers
//! - Uniform success/error result shapes for dispatch
//! - Loading server definitions from a JSON servers file
//!
//! Protocol framing and server process management live behind the
//! `ServerSession`/`SessionConnector` traits: `transport` adapts the rmcp
//! SDK, `memory` provides the in-process double used by tests and demos.

pub mod core;
pub mod discovery;
pub mod errors;
pub mod memory;
pub mod registry;
pub mod session;
pub mod transport;
pub mod types;

// Re-exports for convenience
pub use self::core::McpClient;
pub use self::discovery::load_servers_file;
pub use self::errors::McpError;
pub use self::memory::{InMemoryConnector, InMemorySession};
pub use self::registry::SessionRegistry;
pub use self::session::{ServerSession, SessionConnector};
pub use self::transport::{RmcpConnector, RmcpSession};
pub use self::types::{
    McpServersConfig, ServerConfig, ServerDefinition, ToolCallResult, ToolDescriptor,
};
