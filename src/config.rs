// ABOUTME: Configuration loading for sidechat.
// ABOUTME: Reads ~/.sidechat/config.toml, then environment overrides.

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Sentinel meaning "nobody configured an endpoint yet". Deployments
/// replace it via config file, environment, or CLI flag; sending with the
/// sentinel in place surfaces a user-visible error instead of a request.
pub const ENDPOINT_PLACEHOLDER: &str = "YOUR_CHAT_API_URL_HERE";

/// Environment variable overriding the endpoint base URL.
pub const ENV_API_URL: &str = "SIDECHAT_API_URL";
/// Environment variable overriding the static API key.
pub const ENV_API_KEY: &str = "SIDECHAT_API_KEY";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub endpoint: EndpointConfig,
}

/// Chat API endpoint configuration. Resolved once at startup and
/// immutable for the session.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EndpointConfig {
    pub base_url: String,
    pub api_key: Option<String>,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            base_url: ENDPOINT_PLACEHOLDER.to_string(),
            api_key: None,
        }
    }
}

impl EndpointConfig {
    /// Whether a real endpoint has been supplied.
    pub fn is_configured(&self) -> bool {
        let url = self.base_url.trim();
        !url.is_empty() && url != ENDPOINT_PLACEHOLDER
    }

    /// Short label for the status bar: the URL without its scheme, or a
    /// hint that configuration is still missing.
    pub fn display_label(&self) -> String {
        if !self.is_configured() {
            return "unconfigured".to_string();
        }
        let url = self.base_url.trim();
        let stripped = url
            .strip_prefix("https://")
            .or_else(|| url.strip_prefix("http://"))
            .unwrap_or(url);
        stripped.trim_end_matches('/').to_string()
    }
}

impl Config {
    /// Load config from ~/.sidechat/config.toml, falling back to defaults.
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load config from an explicit path, falling back to defaults when
    /// the file does not exist.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Apply environment overrides on top of file values.
    pub fn apply_env(&mut self) {
        if let Ok(url) = std::env::var(ENV_API_URL) {
            if !url.trim().is_empty() {
                self.endpoint.base_url = url;
            }
        }
        if let Ok(key) = std::env::var(ENV_API_KEY) {
            if !key.trim().is_empty() {
                self.endpoint.api_key = Some(key);
            }
        }
    }

    /// Path to the config file.
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".sidechat")
            .join("config.toml")
    }
}
