//! # Pathway Configuration
//!
//! Layered configuration for the ambient concerns of the dispatch core:
//! logging output and container naming conventions. The dispatch core itself
//! takes no configuration.
//!
//! ## Sources
//!
//! Later sources override earlier ones:
//!
//! 1. Built-in defaults
//! 2. `config/pathway.toml`
//! 3. `config/pathway.<environment>.toml`
//! 4. `PATHWAY__<SECTION>__<KEY>` environment variables
//!
//! ## Usage
//!
//! ```rust,no_run
//! use pathway_core::config::ConfigManager;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let manager = ConfigManager::load()?;
//! let suffix = &manager.config().container.handler_suffix;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod loader;

use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

use crate::constants::system::DEFAULT_HANDLER_SUFFIX;

pub use error::{ConfigResult, ConfigurationError};
pub use loader::ConfigManager;

/// Root configuration structure mirroring `pathway.toml`
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct PathwayConfig {
    pub logging: LoggingConfig,
    pub container: ContainerConfig,
}

/// Output format of the structured log layer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive; derived from the environment when unset
    pub level: Option<String>,
    pub format: LogFormat,
    pub with_target: bool,
    pub with_thread_ids: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: None,
            format: LogFormat::Pretty,
            with_target: true,
            with_thread_ids: false,
        }
    }
}

impl LoggingConfig {
    /// The filter directive to use in `environment`
    pub fn effective_level(&self, environment: &str) -> String {
        self.level
            .clone()
            .unwrap_or_else(|| default_log_level(environment).to_string())
    }
}

/// Log level used when the configuration does not name one
pub fn default_log_level(environment: &str) -> &'static str {
    match environment {
        "production" => "info",
        "test" => "warn",
        _ => "debug",
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ContainerConfig {
    /// Appended to a command type name to form its container service id
    pub handler_suffix: String,
}

impl Default for ContainerConfig {
    fn default() -> Self {
        Self {
            handler_suffix: DEFAULT_HANDLER_SUFFIX.to_string(),
        }
    }
}

impl PathwayConfig {
    /// Validate configuration for consistency and required fields
    pub fn validate(&self) -> ConfigResult<()> {
        if self.container.handler_suffix.trim().is_empty() {
            return Err(ConfigurationError::missing_required_field(
                "container.handler_suffix",
                "container configuration",
            ));
        }

        if let Some(level) = &self.logging.level {
            if let Err(err) = EnvFilter::try_new(level) {
                return Err(ConfigurationError::invalid_value(
                    "logging.level",
                    level.clone(),
                    format!("not a valid log filter: {err}"),
                ));
            }
        }

        Ok(())
    }
}
