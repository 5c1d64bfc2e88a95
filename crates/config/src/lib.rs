//! Configuration loading, validation, and management for Rigsmith.
//!
//! Loads configuration from `~/.rigsmith/config.toml` with environment
//! variable overrides. Validates all settings at startup.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// The root configuration structure.
///
/// Maps directly to `~/.rigsmith/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Component catalog source
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Gateway configuration
    #[serde(default)]
    pub gateway: GatewayConfig,

    /// Conversational front-end configuration
    #[serde(default)]
    pub chat: ChatConfig,

    /// Build snapshot storage
    #[serde(default)]
    pub store: StoreConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Directory holding one `<category>.csv` file per category
    #[serde(default = "default_csv_dir")]
    pub csv_dir: PathBuf,
}

fn default_csv_dir() -> PathBuf {
    PathBuf::from("../csv")
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            csv_dir: default_csv_dir(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_host")]
    pub host: String,

    /// Browser origins allowed by CORS
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: Vec<String>,
}

fn default_port() -> u16 {
    8000
}
fn default_host() -> String {
    "127.0.0.1".into()
}
fn default_allowed_origins() -> Vec<String> {
    vec![
        "http://localhost:5173".into(),
        "http://localhost:3000".into(),
    ]
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            host: default_host(),
            allowed_origins: default_allowed_origins(),
        }
    }
}

#[derive(Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    /// Budget used when a build request names no amount
    #[serde(default = "default_chat_budget")]
    pub default_budget: f64,

    /// Model handed to the conversational answerer
    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// API key for the answerer's backend
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

fn default_chat_budget() -> f64 {
    1300.0
}
fn default_model() -> String {
    "llama-3.3-70b-versatile".into()
}
fn default_temperature() -> f32 {
    0.2
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            default_budget: default_chat_budget(),
            model: default_model(),
            temperature: default_temperature(),
            api_key: None,
        }
    }
}

/// Redact a secret for Debug output.
fn redact(s: &Option<String>) -> &'static str {
    match s {
        Some(_) => "[REDACTED]",
        None => "None",
    }
}

impl std::fmt::Debug for ChatConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatConfig")
            .field("default_budget", &self.default_budget)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("api_key", &redact(&self.api_key))
            .finish()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// "file" or "memory"
    #[serde(default = "default_store_backend")]
    pub backend: String,

    /// Where file snapshots are written (defaults to `~/.rigsmith/builds`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snapshot_dir: Option<PathBuf>,
}

fn default_store_backend() -> String {
    "file".into()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: default_store_backend(),
            snapshot_dir: None,
        }
    }
}

impl StoreConfig {
    /// The effective snapshot directory.
    pub fn resolved_snapshot_dir(&self) -> PathBuf {
        self.snapshot_dir
            .clone()
            .unwrap_or_else(|| AppConfig::config_dir().join("builds"))
    }
}

impl AppConfig {
    /// Load configuration from the default path (~/.rigsmith/config.toml).
    ///
    /// Environment overrides (highest priority):
    /// - `RIGSMITH_CSV_DIR`, then `CSV_DIR`
    /// - `RIGSMITH_API_KEY`, then `GROQ_API_KEY` (only if no key is configured)
    /// - `RIGSMITH_MODEL`
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_dir().join("config.toml");
        let mut config = Self::load_from(&config_path)?;
        config.apply_env(|key| std::env::var(key).ok());
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

    /// Apply environment overrides through a lookup function.
    fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(dir) = lookup("RIGSMITH_CSV_DIR").or_else(|| lookup("CSV_DIR")) {
            self.catalog.csv_dir = PathBuf::from(dir);
        }

        if self.chat.api_key.is_none() {
            self.chat.api_key = lookup("RIGSMITH_API_KEY").or_else(|| lookup("GROQ_API_KEY"));
        }

        if let Some(model) = lookup("RIGSMITH_MODEL") {
            self.chat.model = model;
        }
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".rigsmith")
    }

    /// Validate the configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.chat.temperature < 0.0 || self.chat.temperature > 2.0 {
            return Err(ConfigError::ValidationError(
                "chat.temperature must be between 0.0 and 2.0".into(),
            ));
        }

        if !(self.chat.default_budget.is_finite() && self.chat.default_budget > 0.0) {
            return Err(ConfigError::ValidationError(
                "chat.default_budget must be a positive number".into(),
            ));
        }

        if self.catalog.csv_dir.as_os_str().is_empty() {
            return Err(ConfigError::ValidationError(
                "catalog.csv_dir must not be empty".into(),
            ));
        }

        if !matches!(self.store.backend.as_str(), "file" | "memory") {
            return Err(ConfigError::ValidationError(format!(
                "store.backend must be \"file\" or \"memory\", got \"{}\"",
                self.store.backend
            )));
        }

        Ok(())
    }

    /// Check if an answerer API key is available (from config or environment).
    pub fn has_api_key(&self) -> bool {
        self.chat.api_key.is_some()
    }

    /// Generate a default config TOML string (for the `init` command).
    pub fn default_toml() -> String {
        let config = Self::default();
        toml::to_string_pretty(&config).unwrap_or_default()
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
}
