//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Client-side hub for MCP servers.
#[derive(Debug, Parser)]
#[command(name = "mcphub", version, about)]
pub struct Cli {
    /// JSON servers file to connect on startup.
    #[arg(long, value_name = "PATH", global = true)]
    pub servers: Option<PathBuf>,

    /// Per-call timeout in seconds.
    #[arg(long, value_name = "SECS", default_value_t = 30, global = true)]
    pub timeout_secs: u64,

    /// One-shot command; omit to start the interactive prompt.
    #[command(subcommand)]
    pub command: Option<CliCommand>,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Show connected servers.
    Status,
    /// Run a health check across all servers and print the report.
    Health,
    /// Probe a single server.
    Ping {
        /// Server name to probe.
        server: String,
    },
    /// List tools, optionally for a single server.
    Tools {
        /// Restrict the listing to one server.
        server: Option<String>,
    },
    /// Run a scripted walkthrough against in-memory servers.
    Demo,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_ping() {
        let cli = Cli::parse_from(["mcphub", "ping", "files"]);
        assert!(matches!(cli.command, Some(CliCommand::Ping { server }) if server == "files"));
    }

    #[test]
    fn test_parse_defaults() {
        let cli = Cli::parse_from(["mcphub"]);
        assert!(cli.command.is_none());
        assert!(cli.servers.is_none());
        assert_eq!(cli.timeout_secs, 30);
    }
}
