//! mcphub — client-side hub for MCP servers.
//!
//! Manages named, long-lived sessions to tool-providing MCP servers and
//! aggregates health across them:
//! - [`client`]: session registry, tool dispatch, transport adapters
//! - [`health`]: per-server probes and the rolled-up health report
//! - [`cli`]: the command-line surface over the two modules above
//!
//! The core is transport-agnostic: sessions are established through the
//! [`client::SessionConnector`] seam, so the rmcp-backed adapter and the
//! in-memory double are interchangeable.

pub mod cli;
pub mod client;
pub mod health;

pub use client::{McpClient, McpError, ServerConfig, ToolCallResult, ToolDescriptor};
pub use health::{check_all, ping_server, HealthReport, ServerHealth};

/// Initialize the tracing subscriber.
///
/// Respects `RUST_LOG`, defaulting to `info`. Output goes to stderr so
/// stdout stays clean for command output. Calling this more than once is
/// safe; later calls are no-ops.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    if tracing::dispatcher::has_been_set() {
        return;
    }

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
