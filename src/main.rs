//! Binary entry point.

use std::time::Duration;

use anyhow::Result;
use clap::Parser;

use mcphub::cli::{self, Cli};
use mcphub::client::{McpClient, RmcpConnector};

#[tokio::main]
async fn main() -> Result<()> {
    mcphub::init_tracing();

    let cli = Cli::parse();
    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "mcphub starting");

    let mut client = McpClient::new(Box::new(RmcpConnector::new()));
    client.set_call_timeout(Duration::from_secs(cli.timeout_secs));

    if let Some(path) = &cli.servers {
        cli::connect_from_file(&mut client, path).await?;
    }

    let outcome = cli::run(&mut client, cli.command).await;

    client.disconnect_all();
    outcome
}
