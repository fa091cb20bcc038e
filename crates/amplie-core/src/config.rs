//! Configuration management for the Amplie attendance core

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    /// Logged-in agent settings
    #[serde(default)]
    pub agent: AgentConfig,

    /// Contacts page settings
    #[serde(default)]
    pub contacts: ContactsConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Logged-in agent configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AgentConfig {
    /// Agent whose contacts the "mine" scope shows
    #[serde(default = "default_current_agent")]
    pub current_agent: String,
}

/// Contacts page configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContactsConfig {
    /// Tag counted by the VIP summary card
    #[serde(default = "default_vip_tag")]
    pub vip_tag: String,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Log level or `EnvFilter` directive
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format (json or pretty)
    #[serde(default = "default_log_format")]
    pub format: String,
}

// Default value functions
fn default_current_agent() -> String {
    "Ana Silva".to_string()
}

fn default_vip_tag() -> String {
    crate::contacts::DEFAULT_VIP_TAG.to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "json".to_string()
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            current_agent: default_current_agent(),
        }
    }
}

impl Default for ContactsConfig {
    fn default() -> Self {
        Self {
            vip_tag: default_vip_tag(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from `amplie.toml` (optional) and `AMPLIE_*` variables
    ///
    /// Nested keys use a double underscore, e.g. `AMPLIE_AGENT__CURRENT_AGENT`.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded or parsed.
    pub fn load() -> crate::Result<Self> {
        Self::build(config::File::with_name("amplie").required(false))
    }

    /// Load configuration from an explicit file, still honouring `AMPLIE_*` overrides
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing or cannot be parsed.
    pub fn from_file(path: &Path) -> crate::Result<Self> {
        Self::build(config::File::from(path).required(true))
    }

    fn build<S>(file: S) -> crate::Result<Self>
    where
        S: config::Source + Send + Sync + 'static,
    {
        let config = config::Config::builder()
            .add_source(file)
            .add_source(
                config::Environment::with_prefix("AMPLIE")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        Ok(config.try_deserialize()?)
    }
}
