//! Servers file loading.
//!
//! Reads a JSON file in the `{"servers": {name: {command, args, env}}}`
//! shape and flattens it into per-server configs.

use std::path::Path;

use super::errors::McpError;
use super::types::{McpServersConfig, ServerConfig};

/// Load server configurations from a JSON servers file.
///
/// Returns configs sorted by name so connection order is deterministic.
pub fn load_servers_file(path: &Path) -> Result<Vec<ServerConfig>, McpError> {
    let raw = std::fs::read_to_string(path).map_err(|e| McpError::ConfigError {
        reason: format!("cannot read {}: {e}", path.display()),
    })?;

    let parsed: McpServersConfig =
        serde_json::from_str(&raw).map_err(|e| McpError::ConfigError {
            reason: format!("invalid servers file {}: {e}", path.display()),
        })?;

    let configs = parsed.into_server_configs();
    tracing::debug!(path = %path.display(), servers = configs.len(), "loaded servers file");
    Ok(configs)
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_servers_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("mcp-servers.json");
        std::fs::write(
            &path,
            r#"{
                "servers": {
                    "notes": {"command": "notes-mcp"},
                    "files": {"command": "files-mcp", "args": ["--stdio"], "env": {"ROOT": "/srv"}}
                }
            }"#,
        )
        .unwrap();

        let configs = load_servers_file(&path).unwrap();

        assert_eq!(configs.len(), 2);
        assert_eq!(configs[0].name, "files");
        assert_eq!(configs[0].args, vec!["--stdio"]);
        assert_eq!(configs[0].env.get("ROOT").map(String::as_str), Some("/srv"));
        assert_eq!(configs[1].name, "notes");
        assert!(configs[1].args.is_empty());
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let err = load_servers_file(Path::new("/nonexistent/mcp-servers.json")).unwrap_err();
        assert!(matches!(err, McpError::ConfigError { .. }));
        assert!(err.to_string().contains("cannot read"));
    }

    #[test]
    fn test_malformed_file_is_config_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("mcp-servers.json");
        std::fs::write(&path, "{not json").unwrap();

        let err = load_servers_file(&path).unwrap_err();
        assert!(matches!(err, McpError::ConfigError { .. }));
        assert!(err.to_string().contains("invalid servers file"));
    }
}
