//! Configuration loading and types

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use aci_inventory_api::Protocol;

/// Environment variable naming an explicit config file
pub const CONFIG_ENV: &str = "ACI_INVENTORY_CONFIG";

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Controller connection defaults
    #[serde(default)]
    pub controller: ControllerConfig,
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Controller connection defaults, overridden by command-line flags
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ControllerConfig {
    /// APIC host name or address
    pub host: Option<String>,
    #[serde(default = "default_username")]
    pub username: String,
    pub password: Option<String>,
    #[serde(default)]
    pub protocol: Protocol,
    /// Accept self-signed controller certificates
    #[serde(default)]
    pub insecure_skip_verify: bool,
    #[serde(default = "default_login_timeout_secs")]
    pub login_timeout_secs: u64,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            host: None,
            username: default_username(),
            password: None,
            protocol: Protocol::default(),
            insecure_skip_verify: false,
            login_timeout_secs: default_login_timeout_secs(),
        }
    }
}

impl ControllerConfig {
    #[must_use]
    pub fn login_timeout(&self) -> Duration {
        Duration::from_secs(self.login_timeout_secs)
    }
}

fn default_username() -> String {
    "admin".to_string()
}

fn default_login_timeout_secs() -> u64 {
    2
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from file
    ///
    /// # Errors
    /// Returns error if file cannot be read or parsed
    pub fn load(path: &Path) -> eyre::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| eyre::eyre!("reading {}: {e}", path.display()))?;
        let config: Config =
            toml::from_str(&content).map_err(|e| eyre::eyre!("parsing {}: {e}", path.display()))?;
        Ok(config)
    }

    /// Find the config file to use
    ///
    /// An explicit path wins, then `ACI_INVENTORY_CONFIG`, then the first
    /// existing file among the common locations.
    #[must_use]
    pub fn discover(explicit: Option<&Path>) -> Option<PathBuf> {
        if let Some(path) = explicit {
            return Some(path.to_path_buf());
        }

        if let Ok(path) = std::env::var(CONFIG_ENV) {
            return Some(PathBuf::from(path));
        }

        let paths = [
            Some(PathBuf::from("aci-inventory.toml")),
            Some(PathBuf::from("/etc/aci-inventory/aci-inventory.toml")),
            dirs::config_dir().map(|p| p.join("aci-inventory/aci-inventory.toml")),
        ];

        paths.into_iter().flatten().find(|p| p.exists())
    }

    /// Load the discovered file, or defaults when there is none
    ///
    /// # Errors
    /// Returns error if a discovered file cannot be read or parsed
    pub fn load_default(explicit: Option<&Path>) -> eyre::Result<(Self, Option<PathBuf>)> {
        match Self::discover(explicit) {
            Some(path) => Ok((Self::load(&path)?, Some(path))),
            None => Ok((Config::default(), None)),
        }
    }
}
