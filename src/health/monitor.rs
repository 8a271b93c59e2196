//! Session health probing and aggregation.
//!
//! A ping is a bounded tool-listing probe: a server that answers its tool
//! listing is healthy, and the tool count doubles as the probe payload.

use std::collections::BTreeMap;

use chrono::Utc;

use crate::client::{McpClient, McpError};

use super::report::{HealthReport, HealthSummary, ServerHealth, ServerStatus};

/// Probe a single server by name.
///
/// Unknown names yield `not_connected`; a responsive session yields
/// `healthy` with its tool count; a failing or timed-out probe yields
/// `unhealthy` with the failure message.
pub async fn ping_server(client: &mut McpClient, server_name: &str) -> ServerHealth {
    let timeout = client.call_timeout();

    let Some(session) = client.registry.get_session(server_name) else {
        return ServerHealth::not_connected(server_name);
    };

    match tokio::time::timeout(timeout, session.list_tools()).await {
        Ok(Ok(tools)) => ServerHealth::healthy(server_name, tools.len()),
        Ok(Err(e)) => {
            tracing::warn!(server = %server_name, error = %e, "health probe failed");
            ServerHealth::unhealthy(server_name, e.to_string())
        }
        Err(_) => {
            let e = McpError::Timeout {
                server: server_name.to_string(),
                timeout_ms: timeout.as_millis() as u64,
            };
            tracing::warn!(server = %server_name, error = %e, "health probe timed out");
            ServerHealth::unhealthy(server_name, e.to_string())
        }
    }
}

/// Probe every connected server and roll the results into one report.
///
/// Servers are probed one at a time. Any non-healthy per-server status
/// counts toward `unhealthy_servers`, and the overall verdict follows
/// [`HealthSummary::overall`].
pub async fn check_all(client: &mut McpClient) -> HealthReport {
    let names = client.registry.list_connected();

    let mut servers = BTreeMap::new();
    let mut healthy = 0usize;
    let mut unhealthy = 0usize;

    for name in names {
        let health = ping_server(client, &name).await;
        if health.status == ServerStatus::Healthy {
            healthy += 1;
        } else {
            unhealthy += 1;
        }
        servers.insert(name, health);
    }

    let summary = HealthSummary {
        total_servers: servers.len(),
        healthy_servers: healthy,
        unhealthy_servers: unhealthy,
    };

    HealthReport {
        timestamp: Utc::now(),
        overall_status: summary.overall(),
        servers,
        summary,
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{InMemoryConnector, InMemorySession, ServerConfig, ToolDescriptor};
    use crate::health::report::OverallStatus;
    use std::time::Duration;

    fn config(name: &str) -> ServerConfig {
        ServerConfig::new(name, "stub-mcp", &[])
    }

    fn client_with(connector: InMemoryConnector) -> McpClient {
        McpClient::new(Box::new(connector))
    }

    fn three_tools() -> Vec<ToolDescriptor> {
        (1..=3)
            .map(|i| ToolDescriptor {
                name: format!("tool_{i}"),
                description: None,
            })
            .collect()
    }

    #[tokio::test]
    async fn test_empty_registry_is_vacuously_healthy() {
        let mut client = client_with(InMemoryConnector::new());

        let report = check_all(&mut client).await;

        assert_eq!(report.overall_status, OverallStatus::Healthy);
        assert_eq!(report.summary.total_servers, 0);
        assert_eq!(report.summary.healthy_servers, 0);
        assert_eq!(report.summary.unhealthy_servers, 0);
        assert!(report.servers.is_empty());
    }

    #[tokio::test]
    async fn test_ping_unknown_server() {
        let mut client = client_with(InMemoryConnector::new());

        let health = ping_server(&mut client, "ghost").await;

        assert_eq!(health.status, ServerStatus::NotConnected);
        assert_eq!(health.server, "ghost");
        assert!(health.tools_count.is_none());
        assert!(health.error.unwrap().contains("not connected"));
    }

    #[tokio::test]
    async fn test_ping_healthy_server_counts_tools() {
        let connector = InMemoryConnector::new()
            .register(InMemorySession::new("files").with_tools(three_tools()));
        let mut client = client_with(connector);
        client.connect(config("files")).await.unwrap();

        let health = ping_server(&mut client, "files").await;

        assert_eq!(health.status, ServerStatus::Healthy);
        assert_eq!(health.tools_count, Some(3));
        assert!(health.error.is_none());
    }

    #[tokio::test]
    async fn test_ping_failing_server() {
        let connector = InMemoryConnector::new()
            .register(InMemorySession::new("files").with_listing_error("pipe closed"));
        let mut client = client_with(connector);
        client.connect(config("files")).await.unwrap();

        let health = ping_server(&mut client, "files").await;

        assert_eq!(health.status, ServerStatus::Unhealthy);
        assert!(health.tools_count.is_none());
        assert!(health.error.unwrap().contains("pipe closed"));
    }

    #[tokio::test]
    async fn test_ping_timeout_is_unhealthy() {
        let connector = InMemoryConnector::new().register(
            InMemorySession::new("slow").with_response_delay(Duration::from_millis(200)),
        );
        let mut client = client_with(connector);
        client.set_call_timeout(Duration::from_millis(20));
        client.connect(config("slow")).await.unwrap();

        let health = ping_server(&mut client, "slow").await;

        assert_eq!(health.status, ServerStatus::Unhealthy);
        assert!(health.error.unwrap().contains("timed out"));
    }

    #[tokio::test]
    async fn test_mixed_fleet_is_degraded() {
        let connector = InMemoryConnector::new()
            .register(InMemorySession::new("files").with_tools(three_tools()))
            .register(InMemorySession::new("notes").with_listing_error("timeout"));
        let mut client = client_with(connector);
        client.connect(config("files")).await.unwrap();
        client.connect(config("notes")).await.unwrap();

        let report = check_all(&mut client).await;

        assert_eq!(report.overall_status, OverallStatus::Degraded);
        assert_eq!(report.summary.total_servers, 2);
        assert_eq!(report.summary.healthy_servers, 1);
        assert_eq!(report.summary.unhealthy_servers, 1);
        assert_eq!(report.servers["files"].status, ServerStatus::Healthy);
        assert_eq!(report.servers["files"].tools_count, Some(3));
        assert_eq!(report.servers["notes"].status, ServerStatus::Unhealthy);
    }

    #[tokio::test]
    async fn test_all_probes_failing_is_unhealthy() {
        let connector = InMemoryConnector::new()
            .register(InMemorySession::new("files").with_listing_error("pipe closed"));
        let mut client = client_with(connector);
        client.connect(config("files")).await.unwrap();

        let report = check_all(&mut client).await;

        assert_eq!(report.overall_status, OverallStatus::Unhealthy);
        assert_eq!(report.summary.total_servers, 1);
        assert_eq!(report.summary.healthy_servers, 0);
        assert_eq!(report.summary.unhealthy_servers, 1);
    }

    #[tokio::test]
    async fn test_all_healthy_fleet() {
        let connector = InMemoryConnector::new()
            .register(InMemorySession::new("files").with_tools(three_tools()))
            .register(InMemorySession::new("notes"));
        let mut client = client_with(connector);
        client.connect(config("files")).await.unwrap();
        client.connect(config("notes")).await.unwrap();

        let report = check_all(&mut client).await;

        assert_eq!(report.overall_status, OverallStatus::Healthy);
        assert_eq!(report.summary.healthy_servers, 2);
        assert_eq!(report.summary.unhealthy_servers, 0);
        // A server with zero tools still answers its probe.
        assert_eq!(report.servers["notes"].tools_count, Some(0));
    }
}
