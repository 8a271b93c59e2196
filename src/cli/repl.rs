//! Interactive prompt.
//!
//! Reads one command per line and dispatches to the same operations the
//! one-shot commands use. State (connected servers) persists for the life
//! of the prompt.

use std::io::Write;

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::client::McpClient;
use crate::health;

const HELP: &str = "\
commands:
  status          show connected servers
  health          health check across all servers
  ping <server>   probe one server
  tools [server]  list tools
  help            show this help
  exit            leave the prompt";

/// Run the prompt until `exit` or end of input.
pub async fn run(client: &mut McpClient) -> Result<()> {
    println!("mcphub interactive prompt. Type 'help' for commands.");

    let stdin = BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();

    loop {
        print!("mcp> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        let mut parts = line.split_whitespace();
        let Some(command) = parts.next() else {
            continue;
        };
        let arg = parts.next();

        match command {
            "status" => super::print_status(client),
            "health" => {
                let report = health::check_all(client).await;
                println!("{}", serde_json::to_string_pretty(&report)?);
            }
            "ping" => match arg {
                Some(server) => {
                    let report = health::ping_server(client, server).await;
                    println!("{}", serde_json::to_string_pretty(&report)?);
                }
                None => println!("usage: ping <server>"),
            },
            "tools" => super::print_tools(client, arg).await,
            "help" => println!("{HELP}"),
            "exit" | "quit" => break,
            other => println!("unknown command '{other}'. Type 'help' for commands."),
        }
    }

    Ok(())
}
