//! Health report types.
//!
//! The serialized forms are a stable contract: field names, status
//! spellings, and the presence rules for `tools_count`/`error` are relied
//! on by downstream consumers of the JSON output.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ─── Status Enums ────────────────────────────────────────────────────────────

/// Health of a single server session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServerStatus {
    Healthy,
    Unhealthy,
    NotConnected,
}

/// Rolled-up verdict across all sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverallStatus {
    Healthy,
    Degraded,
    Unhealthy,
}

// ─── Reports ─────────────────────────────────────────────────────────────────

/// Point-in-time health of one server.
#[derive(Debug, Clone, Serialize)]
pub struct ServerHealth {
    pub server: String,
    pub status: ServerStatus,
    pub timestamp: DateTime<Utc>,
    /// Number of tools the server reported. Present only when healthy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools_count: Option<usize>,
    /// Failure message. Present only when unhealthy or not connected.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ServerHealth {
    /// Report for a responsive server.
    pub fn healthy(server: &str, tools_count: usize) -> Self {
        Self {
            server: server.to_string(),
            status: ServerStatus::Healthy,
            timestamp: Utc::now(),
            tools_count: Some(tools_count),
            error: None,
        }
    }

    /// Report for a server whose probe failed.
    pub fn unhealthy(server: &str, error: String) -> Self {
        Self {
            server: server.to_string(),
            status: ServerStatus::Unhealthy,
            timestamp: Utc::now(),
            tools_count: None,
            error: Some(error),
        }
    }

    /// Report for a name with no active session.
    pub fn not_connected(server: &str) -> Self {
        Self {
            server: server.to_string(),
            status: ServerStatus::NotConnected,
            timestamp: Utc::now(),
            tools_count: None,
            error: Some("server not found or not connected".to_string()),
        }
    }
}

/// Aggregate counts across all probed servers.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct HealthSummary {
    pub total_servers: usize,
    pub healthy_servers: usize,
    pub unhealthy_servers: usize,
}

impl HealthSummary {
    /// Three-state classification.
    ///
    /// An empty fleet is vacuously healthy; zero healthy servers out of a
    /// non-empty fleet is unhealthy; any unhealthy server in a fleet that
    /// still has healthy ones is degraded.
    pub fn overall(&self) -> OverallStatus {
        if self.total_servers == 0 {
            OverallStatus::Healthy
        } else if self.healthy_servers == 0 {
            OverallStatus::Unhealthy
        } else if self.unhealthy_servers > 0 {
            OverallStatus::Degraded
        } else {
            OverallStatus::Healthy
        }
    }
}

/// Point-in-time health snapshot across every connected server.
#[derive(Debug, Clone, Serialize)]
pub struct HealthReport {
    pub timestamp: DateTime<Utc>,
    pub overall_status: OverallStatus,
    /// Per-server detail, keyed by server name.
    pub servers: BTreeMap<String, ServerHealth>,
    pub summary: HealthSummary,
}

// ─── Tests ───────────────────────────────────────────────────────────────────
