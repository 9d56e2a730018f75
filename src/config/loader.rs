//! Configuration Loader
//!
//! Environment-aware configuration loading. Discovers `pathway.toml` and its
//! per-environment override in the configuration directory, then applies
//! `PATHWAY__*` environment variables on top.

use super::error::{ConfigResult, ConfigurationError};
use super::PathwayConfig;
use crate::constants::system::{
    CONFIG_FILE_STEM, DEFAULT_CONFIG_DIRECTORY, DEFAULT_ENVIRONMENT, ENVIRONMENT_VARIABLES,
    ENV_PREFIX,
};
use config::{Config, Environment, File};
use std::collections::HashMap;
use std::env;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};
use tracing::{debug, info, warn};

/// Loaded configuration together with where it came from
#[derive(Debug)]
pub struct ConfigManager {
    config: PathwayConfig,
    environment: String,
    config_directory: PathBuf,
}

impl ConfigManager {
    /// Load configuration with environment auto-detection
    pub fn load() -> ConfigResult<Arc<ConfigManager>> {
        Self::load_from_directory(None)
    }

    /// Load configuration from a specific directory
    pub fn load_from_directory(config_dir: Option<PathBuf>) -> ConfigResult<Arc<ConfigManager>> {
        let environment = Self::detect_environment();
        Self::load_from_directory_with_env(config_dir, &environment)
    }

    /// Load configuration from a specific directory with explicit environment
    pub fn load_from_directory_with_env(
        config_dir: Option<PathBuf>,
        environment: &str,
    ) -> ConfigResult<Arc<ConfigManager>> {
        Self::load_with_overrides(config_dir, environment, None)
    }

    /// Load configuration with an explicit set of `PATHWAY__*` variables in
    /// place of the process environment. Useful for testing without touching
    /// global state.
    ///
    /// An explicit `config_dir` must exist. Only the implicit default
    /// directory may be absent, in which case defaults apply.
    pub fn load_with_overrides(
        config_dir: Option<PathBuf>,
        environment: &str,
        overrides: Option<HashMap<String, String>>,
    ) -> ConfigResult<Arc<ConfigManager>> {
        let config_directory = match config_dir {
            Some(dir) if !dir.is_dir() => {
                return Err(ConfigurationError::directory_not_found(dir));
            }
            Some(dir) => dir,
            None => PathBuf::from(DEFAULT_CONFIG_DIRECTORY),
        };

        debug!(
            environment = %environment,
            directory = %config_directory.display(),
            "Loading configuration"
        );

        let config = Self::load_and_merge_config(&config_directory, environment, overrides)?;
        config.validate()?;

        info!(
            environment = %environment,
            handler_suffix = %config.container.handler_suffix,
            log_format = ?config.logging.format,
            "Configuration loaded successfully"
        );

        Ok(Arc::new(ConfigManager {
            config,
            environment: environment.to_string(),
            config_directory,
        }))
    }

    /// Get the loaded configuration
    pub fn config(&self) -> &PathwayConfig {
        &self.config
    }

    pub fn environment(&self) -> &str {
        &self.environment
    }

    pub fn config_directory(&self) -> &Path {
        &self.config_directory
    }

    /// Detect the runtime environment from `PATHWAY_ENV`, then `APP_ENV`
    pub fn detect_environment() -> String {
        ENVIRONMENT_VARIABLES
            .iter()
            .find_map(|name| env::var(name).ok().filter(|value| !value.is_empty()))
            .unwrap_or_else(|| DEFAULT_ENVIRONMENT.to_string())
    }

    /// Base configuration file inside `config_directory`
    pub fn base_config_path(config_directory: &Path) -> PathBuf {
        config_directory.join(format!("{CONFIG_FILE_STEM}.toml"))
    }

    /// Environment override file inside `config_directory`
    pub fn environment_config_path(config_directory: &Path, environment: &str) -> PathBuf {
        config_directory.join(format!("{CONFIG_FILE_STEM}.{environment}.toml"))
    }

    fn load_and_merge_config(
        config_directory: &Path,
        environment: &str,
        overrides: Option<HashMap<String, String>>,
    ) -> ConfigResult<PathwayConfig> {
        let base_path = Self::base_config_path(config_directory);
        let environment_path = Self::environment_config_path(config_directory, environment);

        if !base_path.exists() {
            warn!(
                path = %base_path.display(),
                "Base configuration file not found, using defaults"
            );
        }

        let mut environment_source = Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("__")
            .separator("__");
        if let Some(overrides) = overrides {
            environment_source = environment_source.source(Some(overrides));
        }

        let merged = Config::builder()
            .add_source(File::from(base_path.as_path()).required(false))
            .add_source(File::from(environment_path.as_path()).required(false))
            .add_source(environment_source)
            .build()
            .map_err(|e| ConfigurationError::parse_error(config_directory.display().to_string(), e))?;

        merged
            .try_deserialize::<PathwayConfig>()
            .map_err(|e| ConfigurationError::parse_error(config_directory.display().to_string(), e))
    }
}

/// Global configuration singleton for easy access throughout the application
static GLOBAL_CONFIG: OnceLock<Arc<ConfigManager>> = OnceLock::new();

impl ConfigManager {
    /// Get or initialize the global configuration instance, falling back to
    /// defaults when loading fails
    pub fn global() -> Arc<ConfigManager> {
        GLOBAL_CONFIG
            .get_or_init(|| {
                ConfigManager::load().unwrap_or_else(|e| {
                    warn!(error = %e, "Configuration loading failed, using defaults");
                    Arc::new(ConfigManager {
                        config: PathwayConfig::default(),
                        environment: Self::detect_environment(),
                        config_directory: PathBuf::from(DEFAULT_CONFIG_DIRECTORY),
                    })
                })
            })
            .clone()
    }
}
