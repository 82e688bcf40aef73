//! Configuration file parsing and management.
//!
//! This module handles loading configuration from TOML files and DA_*
//! environment variables, and merging configurations with proper
//! precedence rules.

use crate::error::DomainAvailError;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Configuration loaded from TOML files.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FileConfig {
    /// Default values for CLI options
    #[serde(skip_serializing_if = "Option::is_none")]
    pub defaults: Option<DefaultsConfig>,
}

/// Default configuration values that map to CLI options.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct DefaultsConfig {
    /// Default timeout (as string, e.g., "5s", "30s")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<String>,

    /// Default number of lookups in flight
    #[serde(skip_serializing_if = "Option::is_none")]
    pub concurrency: Option<usize>,

    /// Default verbose listing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verbose: Option<bool>,

    /// WHOIS program to run
    #[serde(skip_serializing_if = "Option::is_none")]
    pub whois_command: Option<String>,
}

/// Configuration discovery and loading functionality.
pub struct ConfigManager;

impl ConfigManager {
    /// Create a new configuration manager.
    pub fn new() -> Self {
        Self
    }

    /// Load configuration from a specific file.
    pub fn load_file<P: AsRef<Path>>(&self, path: P) -> Result<FileConfig, DomainAvailError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(DomainAvailError::file_error(
                path.to_string_lossy(),
                "Configuration file not found",
            ));
        }

        let content = fs::read_to_string(path).map_err(|e| {
            DomainAvailError::file_error(
                path.to_string_lossy(),
                format!("Failed to read configuration file: {}", e),
            )
        })?;

        let config: FileConfig = toml::from_str(&content)?;
        self.validate_config(&config)?;

        Ok(config)
    }

    /// Discover and load configuration files in precedence order.
    ///
    /// Files that exist but fail to load are skipped with a warning.
    pub fn discover_and_load(&self) -> FileConfig {
        let candidates = [
            self.get_xdg_config_path(),
            self.get_global_config_path(),
            self.get_local_config_path(),
        ];

        let mut merged_config = FileConfig::default();
        for path in candidates.into_iter().flatten() {
            match self.load_file(&path) {
                Ok(config) => {
                    tracing::debug!(path = %path.display(), "loaded config file");
                    merged_config = self.merge_configs(merged_config, config);
                }
                Err(e) => {
                    tracing::warn!(path = %path.display(), "ignoring config file: {}", e);
                }
            }
        }

        merged_config
    }

    /// Look for a config file in the current directory.
    fn get_local_config_path(&self) -> Option<PathBuf> {
        ["./domain-avail.toml", "./.domain-avail.toml"]
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }

    /// Look for a config file in the user's home directory.
    fn get_global_config_path(&self) -> Option<PathBuf> {
        let home = env::var_os("HOME")?;
        [".domain-avail.toml", "domain-avail.toml"]
            .iter()
            .map(|candidate| Path::new(&home).join(candidate))
            .find(|path| path.exists())
    }

    /// Get the XDG configuration file path.
    fn get_xdg_config_path(&self) -> Option<PathBuf> {
        let config_dir = env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| env::var_os("HOME").map(|home| Path::new(&home).join(".config")))?;

        let path = config_dir.join("domain-avail").join("config.toml");
        path.exists().then_some(path)
    }

    /// Merge two configurations; values from `higher` win field by field.
    fn merge_configs(&self, lower: FileConfig, higher: FileConfig) -> FileConfig {
        FileConfig {
            defaults: match (lower.defaults, higher.defaults) {
                (Some(lower_defaults), Some(higher_defaults)) => Some(DefaultsConfig {
                    timeout: higher_defaults.timeout.or(lower_defaults.timeout),
                    concurrency: higher_defaults.concurrency.or(lower_defaults.concurrency),
                    verbose: higher_defaults.verbose.or(lower_defaults.verbose),
                    whois_command: higher_defaults
                        .whois_command
                        .or(lower_defaults.whois_command),
                }),
                (lower_defaults, higher_defaults) => higher_defaults.or(lower_defaults),
            },
        }
    }

    /// Validate a configuration for common issues.
    fn validate_config(&self, config: &FileConfig) -> Result<(), DomainAvailError> {
        let Some(defaults) = &config.defaults else {
            return Ok(());
        };

        if let Some(concurrency) = defaults.concurrency {
            if concurrency == 0 || concurrency > 100 {
                return Err(DomainAvailError::config(
                    "Concurrency must be between 1 and 100",
                ));
            }
        }

        if let Some(timeout_str) = &defaults.timeout {
            if parse_timeout_string(timeout_str).is_none() {
                return Err(DomainAvailError::config(format!(
                    "Invalid timeout format '{}'. Use format like '5s', '30s', '2m'",
                    timeout_str
                )));
            }
        }

        if let Some(command) = &defaults.whois_command {
            if command.trim().is_empty() {
                return Err(DomainAvailError::config("whois_command cannot be empty"));
            }
        }

        Ok(())
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Environment variable configuration that mirrors CLI options.
///
/// This represents configuration values that can be set via DA_* variables.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnvConfig {
    pub timeout: Option<Duration>,
    pub concurrency: Option<usize>,
    pub verbose: Option<bool>,
    pub whois_command: Option<String>,
    pub config: Option<String>,
}

/// Load configuration from DA_* environment variables.
///
/// Invalid values are logged as warnings and ignored.
pub fn load_env_config() -> EnvConfig {
    load_env_config_from(|key| env::var(key).ok())
}

/// Same as [`load_env_config`] with an injectable variable source.
fn load_env_config_from(var: impl Fn(&str) -> Option<String>) -> EnvConfig {
    let mut env_config = EnvConfig::default();

    if let Some(val) = var("DA_TIMEOUT") {
        match parse_timeout_string(&val) {
            Some(timeout) => env_config.timeout = Some(timeout),
            None => tracing::warn!("Invalid DA_TIMEOUT='{}', use format like '5s', '2m'", val),
        }
    }

    if let Some(val) = var("DA_CONCURRENCY") {
        match val.trim().parse::<usize>() {
            Ok(concurrency) if (1..=100).contains(&concurrency) => {
                env_config.concurrency = Some(concurrency)
            }
            _ => tracing::warn!("Invalid DA_CONCURRENCY='{}', must be 1-100", val),
        }
    }

    if let Some(val) = var("DA_VERBOSE") {
        match parse_bool(&val) {
            Some(verbose) => env_config.verbose = Some(verbose),
            None => tracing::warn!("Invalid DA_VERBOSE='{}', use true/false", val),
        }
    }

    if let Some(command) = var("DA_WHOIS_COMMAND") {
        if !command.trim().is_empty() {
            env_config.whois_command = Some(command);
        }
    }

    if let Some(path) = var("DA_CONFIG") {
        if !path.trim().is_empty() {
            env_config.config = Some(path);
        }
    }

    env_config
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Parse a timeout string like "5s", "30s", "2m" (bare numbers are seconds).
pub fn parse_timeout_string(timeout_str: &str) -> Option<Duration> {
    let timeout_str = timeout_str.trim().to_lowercase();

    let secs = if let Some(secs) = timeout_str.strip_suffix('s') {
        secs.parse::<u64>().ok()
    } else if let Some(mins) = timeout_str.strip_suffix('m') {
        mins.parse::<u64>().ok().map(|m| m * 60)
    } else {
        timeout_str.parse::<u64>().ok()
    }?;

    (secs > 0).then(|| Duration::from_secs(secs))
}
