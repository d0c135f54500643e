//! Configuration loading, validation, and management for Folio.
//!
//! Loads configuration from `~/.folio/config.toml` with environment
//! variable overrides. Validates all settings at startup.

use folio_core::{KnowledgeBase, KnowledgeError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

/// The root configuration structure.
///
/// Maps directly to `~/.folio/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Optional TOML file replacing the built-in knowledge base
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub knowledge_path: Option<PathBuf>,

    /// Gateway configuration
    #[serde(default)]
    pub gateway: GatewayConfig,

    /// Simulated response latency
    #[serde(default)]
    pub latency: LatencyConfig,

    /// How the assistant presents itself
    #[serde(default)]
    pub assistant: AssistantConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default)]
    pub allow_public_bind: bool,

    /// Maximum accepted request body in bytes
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

fn default_port() -> u16 {
    8787
}
fn default_host() -> String {
    "127.0.0.1".into()
}
fn default_max_body_bytes() -> usize {
    64 * 1024
}
fn default_true() -> bool {
    true
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            host: default_host(),
            allow_public_bind: false,
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

impl GatewayConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Artificial delay before each chat reply, drawn uniformly from
/// `min_ms..=max_ms`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatencyConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default = "default_min_ms")]
    pub min_ms: u64,

    #[serde(default = "default_max_ms")]
    pub max_ms: u64,
}

fn default_min_ms() -> u64 {
    1000
}
fn default_max_ms() -> u64 {
    3000
}

/// Upper bound on `latency.max_ms`.
pub const MAX_LATENCY_MS: u64 = 60_000;

impl Default for LatencyConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            min_ms: default_min_ms(),
            max_ms: default_max_ms(),
        }
    }
}

impl LatencyConfig {
    /// No delay at all.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            min_ms: 0,
            max_ms: 0,
        }
    }

    /// A fixed delay of `ms` milliseconds.
    pub fn fixed(ms: u64) -> Self {
        Self {
            enabled: true,
            min_ms: ms,
            max_ms: ms,
        }
    }

    /// The inclusive delay range `(low, high)` with `low <= high`, or
    /// `None` when no delay applies. Swapped bounds are put back in order.
    pub fn range(&self) -> Option<(Duration, Duration)> {
        let low = self.min_ms.min(self.max_ms);
        let high = self.min_ms.max(self.max_ms);
        if !self.enabled || high == 0 {
            return None;
        }
        Some((Duration::from_millis(low), Duration::from_millis(high)))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssistantConfig {
    /// Reported in the `model` field of every chat reply
    #[serde(default = "default_model_name")]
    pub model_name: String,
}

fn default_model_name() -> String {
    "Llama-Enhanced-Assistant-v1.0".into()
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            model_name: default_model_name(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the default path (~/.folio/config.toml).
    ///
    /// Environment variables override the file:
    /// - `FOLIO_HOST`
    /// - `FOLIO_PORT`
    /// - `FOLIO_KNOWLEDGE_PATH`
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_dir().join("config.toml");
        let mut config = Self::load_from(&config_path)?;
        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Apply overrides from an environment lookup.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("FOLIO_HOST") {
            self.gateway.host = host;
        }

        if let Some(port) = lookup("FOLIO_PORT") {
            self.gateway.port = port.parse().map_err(|_| {
                ConfigError::ValidationError(format!("FOLIO_PORT is not a valid port: {port:?}"))
            })?;
        }

        if let Some(path) = lookup("FOLIO_KNOWLEDGE_PATH").filter(|p| !p.is_empty()) {
            self.knowledge_path = Some(PathBuf::from(path));
        }

        Ok(())
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".folio")
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.latency.min_ms > self.latency.max_ms {
            return Err(ConfigError::ValidationError(
                "latency.min_ms must not exceed latency.max_ms".into(),
            ));
        }

        if self.latency.max_ms > MAX_LATENCY_MS {
            return Err(ConfigError::ValidationError(format!(
                "latency.max_ms must be at most {MAX_LATENCY_MS}"
            )));
        }

        if self.gateway.max_body_bytes == 0 {
            return Err(ConfigError::ValidationError(
                "gateway.max_body_bytes must be > 0".into(),
            ));
        }

        if self.gateway.host == "0.0.0.0" && !self.gateway.allow_public_bind {
            return Err(ConfigError::ValidationError(
                "gateway.host is 0.0.0.0 but allow_public_bind is false".into(),
            ));
        }

        if self.assistant.model_name.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "assistant.model_name must not be empty".into(),
            ));
        }

        Ok(())
    }

    /// Load the knowledge base this configuration points at, or the
    /// built-in one.
    pub fn load_knowledge(&self) -> Result<Arc<KnowledgeBase>, ConfigError> {
        match &self.knowledge_path {
            Some(path) => Ok(Arc::new(KnowledgeBase::load_from(path)?)),
            None => Ok(KnowledgeBase::shared()),
        }
    }

    /// Generate a default config TOML string (for the `init` command).
    pub fn default_toml() -> String {
        let config = Self::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            knowledge_path: None,
            gateway: GatewayConfig::default(),
            latency: LatencyConfig::default(),
            assistant: AssistantConfig::default(),
        }
    }
}

/// Get the user's home directory.
fn dirs_home() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\Users\\Default"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/tmp"))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),

    #[error(transparent)]
    Knowledge(#[from] KnowledgeError),
}
