use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

/// Top-level configuration. Every section has defaults, and a missing
/// config file yields `Config::default()` — both capabilities disabled —
/// so the tabular path works with no configuration at all.
///
/// The pipeline's fixed limits (15 pages, 5 context lines, 500 fallback
/// tokens) are constants in their modules, not configuration.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub qa: CapabilityConfig,
    #[serde(default)]
    pub summarizer: CapabilityConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

/// Settings for one external model capability (QA or summarization).
#[derive(Debug, Deserialize, Clone)]
pub struct CapabilityConfig {
    /// `"http"` or `"disabled"`.
    #[serde(default = "default_provider")]
    pub provider: String,
    /// Inference endpoint URL, required for the `http` provider.
    #[serde(default)]
    pub endpoint: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for CapabilityConfig {
    fn default() -> Self {
        Self {
            provider: "disabled".to_string(),
            endpoint: None,
            timeout_secs: 30,
        }
    }
}

impl CapabilityConfig {
    pub fn is_enabled(&self) -> bool {
        self.provider != "disabled"
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

fn default_provider() -> String {
    "disabled".to_string()
}
fn default_timeout_secs() -> u64 {
    30
}
fn default_bind() -> String {
    "127.0.0.1:7340".to_string()
}

pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
    Ok(config)
}
