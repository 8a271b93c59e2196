//! Session registry — owns the name→session and name→config mappings.
//!
//! Single source of truth for "is server X connected". The two maps are
//! mutated only by `connect` and `disconnect_all`, and always together, so
//! their key sets stay identical.

use std::collections::HashMap;
use std::time::Duration;

use super::errors::McpError;
use super::session::{ServerSession, SessionConnector};
use super::types::ServerConfig;

// ─── Constants ───────────────────────────────────────────────────────────────

/// Timeout for the initialization handshake after the channel comes up.
const INIT_TIMEOUT: Duration = Duration::from_secs(30);

// ─── SessionRegistry ─────────────────────────────────────────────────────────

/// Owns active sessions and their configurations, keyed by server name.
pub struct SessionRegistry {
    /// Active sessions.
    sessions: HashMap<String, Box<dyn ServerSession>>,
    /// Configuration each session was established with.
    configs: HashMap<String, ServerConfig>,
    /// Establishes new sessions.
    connector: Box<dyn SessionConnector>,
}

impl SessionRegistry {
    /// Create an empty registry that establishes sessions through `connector`.
    pub fn new(connector: Box<dyn SessionConnector>) -> Self {
        Self {
            sessions: HashMap::new(),
            configs: HashMap::new(),
            connector,
        }
    }

    /// Connect to a server and install the session under `config.name`.
    ///
    /// Replaces any existing entry for that name (last connect wins; the
    /// prior session is dropped). On failure nothing is installed and the
    /// registry is left exactly as it was.
    pub async fn connect(&mut self, config: ServerConfig) -> Result<(), McpError> {
        let name = config.name.clone();

        let mut session = match self.connector.connect(&config).await {
            Ok(session) => session,
            Err(e) => {
                tracing::warn!(server = %name, error = %e, "failed to connect to MCP server");
                return Err(e);
            }
        };

        match tokio::time::timeout(INIT_TIMEOUT, session.initialize()).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                tracing::warn!(server = %name, error = %e, "MCP server initialization failed");
                return Err(e);
            }
            Err(_) => {
                let e = McpError::InitFailed {
                    name: name.clone(),
                    reason: format!("handshake timed out after {}s", INIT_TIMEOUT.as_secs()),
                };
                tracing::warn!(server = %name, error = %e, "MCP server initialization failed");
                return Err(e);
            }
        }

        tracing::info!(server = %name, command = %config.command, "MCP server connected");

        // Handle and config are installed together; the key sets must match.
        self.sessions.insert(name.clone(), session);
        self.configs.insert(name, config);
        Ok(())
    }

    /// Drop all sessions and configs. Idempotent.
    ///
    /// Sessions are released by drop; cleanup of the underlying channel is
    /// the transport adapter's obligation.
    pub fn disconnect_all(&mut self) {
        let dropped = self.sessions.len();
        self.sessions.clear();
        self.configs.clear();
        if dropped > 0 {
            tracing::info!(servers = dropped, "disconnected all MCP servers");
        }
    }

    /// Names of all connected servers.
    pub fn list_connected(&self) -> Vec<String> {
        self.sessions.keys().cloned().collect()
    }

    /// Whether `name` has an active session.
    pub fn is_connected(&self, name: &str) -> bool {
        self.sessions.contains_key(name)
    }

    /// Look up the session for `name`. Absence means not connected.
    pub fn get_session(&mut self, name: &str) -> Option<&mut dyn ServerSession> {
        match self.sessions.get_mut(name) {
            Some(s) => Some(s.as_mut()),
            None => None,
        }
    }

    /// Configuration the named server was connected with.
    pub fn get_config(&self, name: &str) -> Option<&ServerConfig> {
        self.configs.get(name)
    }

    /// Number of connected servers.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Whether no servers are connected.
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Mutable iteration over `(name, session)` pairs.
    pub(crate) fn sessions_iter_mut(
        &mut self,
    ) -> impl Iterator<Item = (&String, &mut Box<dyn ServerSession>)> + '_ {
        self.sessions.iter_mut()
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::super::memory::{InMemoryConnector, InMemorySession};
    use super::*;

    fn config(name: &str) -> ServerConfig {
        ServerConfig::new(name, "stub-mcp", &[])
    }

    fn registry_with(connector: InMemoryConnector) -> SessionRegistry {
        SessionRegistry::new(Box::new(connector))
    }

    #[tokio::test]
    async fn test_connect_installs_session_and_config() {
        let connector = InMemoryConnector::new().register(InMemorySession::new("files"));
        let mut registry = registry_with(connector);

        registry.connect(config("files")).await.unwrap();

        assert!(registry.is_connected("files"));
        assert!(registry.get_config("files").is_some());
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.list_connected(), vec!["files"]);
    }

    #[tokio::test]
    async fn test_connect_refused_leaves_registry_unmodified() {
        let connector = InMemoryConnector::new().refuse("files", "spawn failed");
        let mut registry = registry_with(connector);

        let err = registry.connect(config("files")).await.unwrap_err();
        assert!(matches!(err, McpError::ConnectFailed { .. }));

        assert!(!registry.is_connected("files"));
        assert!(registry.get_config("files").is_none());
        assert!(registry.is_empty());
    }

    #[tokio::test]
    async fn test_init_failure_leaves_registry_unmodified() {
        let connector = InMemoryConnector::new()
            .register(InMemorySession::new("files").with_init_error("handshake rejected"));
        let mut registry = registry_with(connector);

        let err = registry.connect(config("files")).await.unwrap_err();
        assert!(matches!(err, McpError::InitFailed { .. }));

        assert!(!registry.is_connected("files"));
        assert!(registry.get_config("files").is_none());
        assert!(registry.is_empty());
    }

    #[tokio::test]
    async fn test_last_connect_wins() {
        let connector = InMemoryConnector::new().register(InMemorySession::new("files"));
        let mut registry = registry_with(connector);

        registry
            .connect(ServerConfig::new("files", "files-mcp-v1", &[]))
            .await
            .unwrap();
        registry
            .connect(ServerConfig::new("files", "files-mcp-v2", &["--stdio"]))
            .await
            .unwrap();

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get_config("files").unwrap().command, "files-mcp-v2");
    }

    #[tokio::test]
    async fn test_disconnect_all_idempotent() {
        let connector = InMemoryConnector::new()
            .register(InMemorySession::new("files"))
            .register(InMemorySession::new("notes"));
        let mut registry = registry_with(connector);

        registry.connect(config("files")).await.unwrap();
        registry.connect(config("notes")).await.unwrap();
        assert_eq!(registry.len(), 2);

        registry.disconnect_all();
        assert!(registry.is_empty());
        assert!(registry.get_config("files").is_none());

        registry.disconnect_all();
        assert!(registry.is_empty());
        assert!(registry.list_connected().is_empty());
    }

    #[tokio::test]
    async fn test_session_and_config_keysets_match_after_mixed_sequence() {
        let connector = InMemoryConnector::new()
            .register(InMemorySession::new("files"))
            .register(InMemorySession::new("notes"))
            .refuse("broken", "spawn failed");
        let mut registry = registry_with(connector);

        registry.connect(config("files")).await.unwrap();
        registry.connect(config("broken")).await.unwrap_err();
        registry.connect(config("notes")).await.unwrap();
        registry.connect(config("files")).await.unwrap();

        let mut connected = registry.list_connected();
        connected.sort();
        assert_eq!(connected, vec!["files", "notes"]);
        for name in &connected {
            assert!(registry.get_config(name).is_some());
        }
        assert!(registry.get_config("broken").is_none());

        registry.disconnect_all();
        for name in ["files", "notes", "broken"] {
            assert!(!registry.is_connected(name));
            assert!(registry.get_config(name).is_none());
        }
    }

    #[tokio::test]
    async fn test_get_session_absent_for_unknown_name() {
        let mut registry = registry_with(InMemoryConnector::new());
        assert!(registry.get_session("ghost").is_none());
    }
}
