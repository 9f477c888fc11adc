// Process configuration: command-line flags, environment and an optional TOML file

use banksheets_sdk::DEFAULT_BASE_URL;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("API key is required. Use --api-key=YOUR_API_KEY or set MCP_API_KEY environment variable")]
    MissingApiKey,

    #[error("Failed to read configuration file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse configuration file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Contents of the optional configuration file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub base_url: Option<String>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Resolved settings the server starts with
#[derive(Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub api_key: String,
    pub base_url: String,
}

impl ServerConfig {
    /// Merge sources: explicit values (flags or env, already folded together
    /// by the CLI parser) win over the file, which wins over defaults.
    pub fn resolve(
        api_key: Option<String>,
        base_url: Option<String>,
        file: Option<FileConfig>,
    ) -> Result<Self, ConfigError> {
        let file = file.unwrap_or_default();

        let api_key = non_empty(api_key)
            .or_else(|| non_empty(file.api_key))
            .ok_or(ConfigError::MissingApiKey)?;

        let base_url = non_empty(base_url)
            .or_else(|| non_empty(file.base_url))
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Ok(Self { api_key, base_url })
    }

    /// Key shortened for log output
    pub fn redacted_api_key(&self) -> String {
        redact(&self.api_key)
    }
}

impl std::fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerConfig")
            .field("api_key", &self.redacted_api_key())
            .field("base_url", &self.base_url)
            .finish()
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// First eight characters followed by `...`
pub fn redact(key: &str) -> String {
    let prefix: String = key.chars().take(8).collect();
    format!("{}...", prefix)
}
