//! Scripted walkthrough on in-memory servers.
//!
//! Connects two canned servers and exercises the same operations the
//! one-shot commands use: health, tool listing, a tool call, and the
//! failure shape for an unknown server. Nothing here launches a real
//! server process.

use anyhow::Result;
use serde_json::json;

use crate::client::{
    InMemoryConnector, InMemorySession, McpClient, ServerConfig, ToolDescriptor,
};
use crate::health;

fn file_tools() -> Vec<ToolDescriptor> {
    vec![
        ToolDescriptor {
            name: "read_file".to_string(),
            description: Some("Read a file from the workspace".to_string()),
        },
        ToolDescriptor {
            name: "write_file".to_string(),
            description: Some("Write a file into the workspace".to_string()),
        },
        ToolDescriptor {
            name: "list_dir".to_string(),
            description: Some("List a workspace directory".to_string()),
        },
    ]
}

/// Run the walkthrough.
pub async fn run() -> Result<()> {
    let connector = InMemoryConnector::new()
        .register(InMemorySession::new("files").with_tools(file_tools()))
        .register(InMemorySession::new("notes").with_tools(vec![ToolDescriptor {
            name: "append_note".to_string(),
            description: None,
        }]));

    let mut client = McpClient::new(Box::new(connector));

    println!("== health before any connect ==");
    let report = health::check_all(&mut client).await;
    println!("{}", serde_json::to_string_pretty(&report)?);

    client
        .connect(ServerConfig::new("files", "files-mcp", &["--stdio"]))
        .await?;
    client
        .connect(ServerConfig::new("notes", "notes-mcp", &[]))
        .await?;
    let mut connected = client.connected_servers();
    connected.sort();
    println!("\n== connected: {} ==", connected.join(", "));

    println!("\n== health after connect ==");
    let report = health::check_all(&mut client).await;
    println!("{}", serde_json::to_string_pretty(&report)?);

    println!("\n== tools ==");
    super::print_tools(&mut client, None).await;

    println!("\n== call files/read_file ==");
    let result = client
        .call_tool("files", "read_file", json!({"path": "README.md"}))
        .await;
    println!("{}", serde_json::to_string_pretty(&result)?);

    println!("\n== call against an unknown server ==");
    let result = client.call_tool("ghost", "read_file", json!({})).await;
    println!("{}", serde_json::to_string_pretty(&result)?);

    client.disconnect_all();
    println!(
        "\n== after disconnect_all: {} connected ==",
        client.connected_servers().len()
    );

    Ok(())
}
