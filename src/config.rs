//! Application configuration
//!
//! Read from a TOML file (default `~/.config/parking-billing/config.toml`).
//! Every section and field is optional; missing values fall back to defaults.
//!
//! ```toml
//! [server]
//! host = "0.0.0.0"
//! port = 8080
//!
//! [logging]
//! level = "info"
//! format = "json"
//!
//! [billing]
//! invalid_session_policy = "skip"
//! seed_demo_data = true
//! data_file = "/var/lib/parking-billing/seed.json"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::application::InvalidSessionPolicy;
use crate::shared::errors::InfraError;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub billing: BillingConfig,
}

/// HTTP listener settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Seconds to wait for in-flight requests on shutdown
    pub shutdown_timeout: u64,
}

impl ServerConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            shutdown_timeout: 30,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, overridden by `RUST_LOG`
    pub level: String,
    /// `text` or `json`
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "text".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BillingConfig {
    pub invalid_session_policy: InvalidSessionPolicy,
    /// Load the built-in demo facilities and customers
    pub seed_demo_data: bool,
    /// JSON seed file with profiles, customers and sessions
    pub data_file: Option<PathBuf>,
}

impl Default for BillingConfig {
    fn default() -> Self {
        Self {
            invalid_session_policy: InvalidSessionPolicy::default(),
            seed_demo_data: true,
            data_file: None,
        }
    }
}

impl AppConfig {
    /// Load from `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, InfraError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml(&raw)
    }

    pub fn from_toml(raw: &str) -> Result<Self, InfraError> {
        Ok(toml::from_str(raw)?)
    }
}

/// `<config dir>/parking-billing/config.toml`, or `./config.toml` when the
/// platform has no config directory.
pub fn default_config_path() -> PathBuf {
    dirs_next::config_dir()
        .map(|dir| dir.join("parking-billing").join("config.toml"))
        .unwrap_or_else(|| PathBuf::from("config.toml"))
}
