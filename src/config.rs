//! Configuration loading for searchdocs.
//!
//! Loads settings from `searchdocs.toml` when present; the tool is
//! zero-configuration, so every field has a working default.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Upstream endpoint configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourcesConfig {
    /// DuckDuckGo instant-answer endpoint.
    pub instant_answer_url: String,
    /// Wikipedia summary-by-title endpoint (page title is appended).
    pub encyclopedia_url: String,
    /// CORS-relay proxy endpoint (target URL is appended, percent-encoded).
    pub relay_url: String,
    /// Timeout for the primary instant-answer request, in seconds.
    pub timeout_secs: u64,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            instant_answer_url: "https://api.duckduckgo.com/".to_string(),
            encyclopedia_url: "https://en.wikipedia.org/api/rest_v1/page/summary/".to_string(),
            relay_url: "https://api.allorigins.win/get?url=".to_string(),
            timeout_secs: 10,
        }
    }
}

/// Output settings for generated documents.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory the PDF/text files are written to.
    pub dir: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
        }
    }
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub sources: SourcesConfig,
    pub output: OutputConfig,
}

impl Config {
    /// Load configuration from the default locations, falling back to
    /// defaults when no config file exists.
    pub fn load() -> Result<Self, ConfigError> {
        match Self::find_config_file() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load configuration from a specific path.
    pub fn load_from(path: &PathBuf) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Find the config file in standard locations.
    fn find_config_file() -> Option<PathBuf> {
        // Check current directory first
        let local_config = PathBuf::from("searchdocs.toml");
        if local_config.exists() {
            return Some(local_config);
        }

        // Check home directory
        if let Some(home) = dirs::home_dir() {
            let home_config = home
                .join(".config")
                .join("searchdocs")
                .join("searchdocs.toml");
            if home_config.exists() {
                return Some(home_config);
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_public_endpoints() {
        let config = Config::default();
        assert!(config.sources.instant_answer_url.contains("duckduckgo"));
        assert!(config.sources.encyclopedia_url.contains("wikipedia"));
        assert_eq!(config.sources.timeout_secs, 10);
    }

    #[test]
    fn partial_config_fills_in_defaults() {
        let toml = r#"
            [sources]
            timeout_secs = 3
        "#;
        let config: Config = toml::from_str(toml).expect("parse");
        assert_eq!(config.sources.timeout_secs, 3);
        assert!(config.sources.relay_url.contains("allorigins"));
        assert_eq!(config.output.dir, PathBuf::from("."));
    }
}
