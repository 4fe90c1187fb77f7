//! Configuration loading and validation for InboxPilot.
//!
//! Loads configuration from `~/.inboxpilot/config.toml` (or the path in
//! `INBOXPILOT_CONFIG`) with environment variable overrides. A missing
//! config file is not an error — every field has a sensible default for
//! local development.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Errors raised while loading or parsing configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// The root configuration structure.
///
/// Maps directly to `~/.inboxpilot/config.toml`.
#[derive(Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Service name reported by the health endpoint
    #[serde(default = "default_service_name")]
    pub service_name: String,

    /// Gateway configuration
    #[serde(default)]
    pub gateway: GatewayConfig,
}

fn default_service_name() -> String {
    "inboxpilot-agent".into()
}

/// HTTP gateway settings.
#[derive(Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Bind address
    #[serde(default = "default_host")]
    pub host: String,

    /// Bind port
    #[serde(default = "default_port")]
    pub port: u16,

    /// When set, /v1 requests must present this key in the
    /// `x-agent-platform-key` header
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inbound_api_key: Option<String>,
}

fn default_host() -> String {
    "127.0.0.1".into()
}
fn default_port() -> u16 {
    8807
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            inbound_api_key: None,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            service_name: default_service_name(),
            gateway: GatewayConfig::default(),
        }
    }
}

// Keep the inbound key out of Debug output.
impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("service_name", &self.service_name)
            .field("gateway.host", &self.gateway.host)
            .field("gateway.port", &self.gateway.port)
            .field(
                "gateway.inbound_api_key",
                &self.gateway.inbound_api_key.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

impl AppConfig {
    /// Load configuration with environment overrides.
    ///
    /// Resolution order, later wins:
    /// 1. Built-in defaults
    /// 2. `$INBOXPILOT_CONFIG` or `~/.inboxpilot/config.toml`, when present
    /// 3. `INBOXPILOT_HOST`, `INBOXPILOT_PORT`, `INBOXPILOT_INBOUND_API_KEY`
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var("INBOXPILOT_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| Self::config_dir().join("config.toml"));

        let mut config = if path.exists() {
            Self::load_from(&path)?
        } else {
            debug!(path = %path.display(), "No config file, using defaults");
            Self::default()
        };

        if let Ok(host) = std::env::var("INBOXPILOT_HOST") {
            config.gateway.host = host;
        }
        if let Ok(port) = std::env::var("INBOXPILOT_PORT") {
            config.gateway.port = port
                .parse()
                .map_err(|_| ConfigError::Invalid(format!("INBOXPILOT_PORT '{port}' is not a port")))?;
        }
        if let Ok(key) = std::env::var("INBOXPILOT_INBOUND_API_KEY") {
            if !key.is_empty() {
                config.gateway.inbound_api_key = Some(key);
            }
        }

        Ok(config)
    }

    /// Load configuration from a specific file.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// The configuration directory, `~/.inboxpilot`.
    pub fn config_dir() -> PathBuf {
        home_dir().join(".inboxpilot")
    }
}

fn home_dir() -> PathBuf {
    #[cfg(windows)]
    {
        std::env::var("USERPROFILE").map(PathBuf::from).unwrap_or_default()
    }
    #[cfg(not(windows))]
    {
        std::env::var("HOME").map(PathBuf::from).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_are_local_dev_friendly() {
        let config = AppConfig::default();
        assert_eq!(config.service_name, "inboxpilot-agent");
        assert_eq!(config.gateway.host, "127.0.0.1");
        assert_eq!(config.gateway.port, 8807);
        assert!(config.gateway.inbound_api_key.is_none());
    }

    #[test]
    fn loads_partial_toml_with_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "service_name = \"agent-staging\"\n\n[gateway]\nport = 9000"
        )
        .unwrap();

        let config = AppConfig::load_from(file.path()).unwrap();
        assert_eq!(config.service_name, "agent-staging");
        assert_eq!(config.gateway.port, 9000);
        assert_eq!(config.gateway.host, "127.0.0.1");
    }

    #[test]
    fn parse_error_names_the_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "not valid toml [[").unwrap();

        let err = AppConfig::load_from(file.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse"));
    }

    #[test]
    fn debug_redacts_inbound_key() {
        let mut config = AppConfig::default();
        config.gateway.inbound_api_key = Some("super-secret".into());
        let debug = format!("{config:?}");
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("REDACTED"));
    }
}
