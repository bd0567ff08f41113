use serde::{Deserialize, Serialize};

use super::errors::ConfigError;
use super::inventory::InventoryConfig;
use super::logging::LoggingConfig;
use super::resolution::ResolutionConfig;

const LOCAL_CONFIG_PATH: &str = "nicprobe.toml";
const SYSTEM_CONFIG_PATH: &str = "/etc/nicprobe/config.toml";

/// Main configuration structure for nicprobe
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Polling loop parameters
    #[serde(default)]
    pub resolution: ResolutionConfig,

    /// Inventory snapshot source
    #[serde(default)]
    pub inventory: InventoryConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. nicprobe.toml in current directory
    /// 3. /etc/nicprobe/config.toml
    /// 4. Default configuration
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = path {
            Self::from_file(path)?
        } else if std::path::Path::new(LOCAL_CONFIG_PATH).exists() {
            Self::from_file(LOCAL_CONFIG_PATH)?
        } else if std::path::Path::new(SYSTEM_CONFIG_PATH).exists() {
            Self::from_file(SYSTEM_CONFIG_PATH)?
        } else {
            Self::default()
        };

        config.apply_cli_overrides(cli_overrides);
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(secs) = overrides.max_wait_secs {
            self.resolution.max_wait_secs = secs;
        }
        if let Some(secs) = overrides.poll_interval_secs {
            self.resolution.poll_interval_secs = secs;
        }
        if overrides.use_lease_fallback {
            self.resolution.use_lease_fallback = true;
        }
        if let Some(path) = overrides.inventory_path {
            self.inventory.path = path;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.resolution.max_wait_secs == 0 {
            return Err(ConfigError::Validation(
                "max_wait_secs must be greater than 0".to_string(),
            ));
        }

        if self.resolution.poll_interval_secs == 0 {
            return Err(ConfigError::Validation(
                "poll_interval_secs must be greater than 0".to_string(),
            ));
        }

        if self.inventory.path.trim().is_empty() {
            return Err(ConfigError::Validation(
                "inventory path cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct CliOverrides {
    pub max_wait_secs: Option<u64>,
    pub poll_interval_secs: Option<u64>,
    pub use_lease_fallback: bool,
    pub inventory_path: Option<String>,
    pub log_level: Option<String>,
}
