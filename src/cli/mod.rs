//! Command-line surface.
//!
//! Thin presentation layer over the library: parses commands, invokes the
//! public client and health operations, and renders their results. JSON
//! output goes to stdout; logs go to stderr.

pub mod args;

mod demo;
mod repl;

use std::path::Path;

use anyhow::Result;

pub use self::args::{Cli, CliCommand};

use crate::client::{discovery, McpClient};
use crate::health;

/// Execute `command` against `client`, or start the interactive prompt when
/// no command is given.
pub async fn run(client: &mut McpClient, command: Option<CliCommand>) -> Result<()> {
    match command {
        Some(command) => run_command(client, command).await,
        None => repl::run(client).await,
    }
}

/// Connect every server from a servers file.
///
/// Individual connection failures are logged and skipped; a partial fleet
/// is still usable. An unreadable or malformed file is an error.
pub async fn connect_from_file(client: &mut McpClient, path: &Path) -> Result<()> {
    let configs = discovery::load_servers_file(path)?;
    for config in configs {
        let name = config.name.clone();
        if let Err(e) = client.connect(config).await {
            tracing::warn!(server = %name, error = %e, "server failed to connect (non-fatal)");
        }
    }
    Ok(())
}

async fn run_command(client: &mut McpClient, command: CliCommand) -> Result<()> {
    match command {
        CliCommand::Status => print_status(client),
        CliCommand::Health => {
            let report = health::check_all(client).await;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        CliCommand::Ping { server } => {
            let report = health::ping_server(client, &server).await;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        CliCommand::Tools { server } => print_tools(client, server.as_deref()).await,
        CliCommand::Demo => demo::run().await?,
    }
    Ok(())
}

fn print_status(client: &McpClient) {
    let mut names = client.connected_servers();
    names.sort();
    println!("connected servers: {}", names.len());
    for name in &names {
        println!("  - {name}");
    }
}

async fn print_tools(client: &mut McpClient, server: Option<&str>) {
    let tools_by_server = client.list_tools(server).await;
    if tools_by_server.is_empty() {
        println!("no tools available");
        return;
    }

    let mut names: Vec<&String> = tools_by_server.keys().collect();
    names.sort();
    for name in names {
        let tools = &tools_by_server[name];
        println!("{name} ({} tools)", tools.len());
        for tool in tools {
            match &tool.description {
                Some(description) => println!("  - {}: {description}", tool.name),
                None => println!("  - {}", tool.name),
            }
        }
    }
}
