//! Layered configuration.
//!
//! Resolution order (highest priority first):
//! 1. Environment variables (`VANTAGE_*`)
//! 2. Project config (`vantage.toml` in the project root)
//! 3. User config (`~/.vantage/config.toml`)
//! 4. Compiled defaults

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

/// Graph-build settings.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct BuildConfig {
    /// Per-account discovery timeout in seconds.
    pub account_timeout_secs: Option<u64>,
    /// Whether builds replicate to the durable mirror when a sink is
    /// configured.
    pub mirror_enabled: Option<bool>,
}

impl BuildConfig {
    pub fn account_timeout(&self) -> Duration {
        Duration::from_secs(self.account_timeout_secs.unwrap_or(30))
    }

    pub fn mirror_enabled(&self) -> bool {
        self.mirror_enabled.unwrap_or(true)
    }
}

/// Path-search and query settings.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Maximum hop count for simple-path enumeration. Load-bearing cutoff:
    /// enumeration is exponential in the worst case.
    pub max_path_length: Option<u32>,
    /// Result cap for ranked attack paths.
    pub max_paths: Option<usize>,
    /// Default result cap for the high-risk node listing.
    pub high_risk_limit: Option<usize>,
    /// Hop bound for the durable-store deep path query.
    pub deep_path_hop_limit: Option<u32>,
}

impl AnalysisConfig {
    pub fn max_path_length(&self) -> u32 {
        self.max_path_length.unwrap_or(5)
    }

    pub fn max_paths(&self) -> usize {
        self.max_paths.unwrap_or(20)
    }

    pub fn high_risk_limit(&self) -> usize {
        self.high_risk_limit.unwrap_or(10)
    }

    pub fn deep_path_hop_limit(&self) -> u32 {
        self.deep_path_hop_limit.unwrap_or(10)
    }
}

/// Durable mirror settings.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct StorageConfig {
    /// Database file path. `None` keeps the mirror disabled.
    pub path: Option<String>,
    pub read_pool_size: Option<usize>,
}

impl StorageConfig {
    pub fn read_pool_size(&self) -> usize {
        self.read_pool_size.unwrap_or(4)
    }
}

/// Top-level configuration aggregating all sub-configs.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct VantageConfig {
    pub build: BuildConfig,
    pub analysis: AnalysisConfig,
    pub storage: StorageConfig,
}

impl VantageConfig {
    /// Load configuration with layered resolution (see module docs).
    pub fn load(root: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Layer 3 (lowest priority): user config
        if let Some(user_config_path) = user_config_path() {
            if user_config_path.exists() {
                match Self::merge_toml_file(&mut config, &user_config_path) {
                    Ok(()) => {}
                    Err(e @ ConfigError::ParseError { .. }) => return Err(e),
                    Err(_) => {
                        // Unreadable user config is a warning, not fatal.
                    }
                }
            }
        }

        // Layer 2: project config
        let project_config_path = root.join("vantage.toml");
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
        }

        // Layer 1 (highest priority): environment variables
        Self::apply_env_overrides(&mut config);

        Self::validate(&config)?;

        Ok(config)
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate the configuration values.
    pub fn validate(config: &VantageConfig) -> Result<(), ConfigError> {
        if let Some(timeout) = config.build.account_timeout_secs {
            if timeout == 0 {
                return Err(ConfigError::ValidationFailed {
                    field: "build.account_timeout_secs".to_string(),
                    message: "must be greater than 0".to_string(),
                });
            }
        }
        if let Some(hops) = config.analysis.max_path_length {
            if hops == 0 {
                return Err(ConfigError::ValidationFailed {
                    field: "analysis.max_path_length".to_string(),
                    message: "must be at least 1".to_string(),
                });
            }
        }
        if let Some(hops) = config.analysis.deep_path_hop_limit {
            if hops == 0 {
                return Err(ConfigError::ValidationFailed {
                    field: "analysis.deep_path_hop_limit".to_string(),
                    message: "must be at least 1".to_string(),
                });
            }
        }
        if let Some(max_paths) = config.analysis.max_paths {
            if max_paths == 0 {
                return Err(ConfigError::ValidationFailed {
                    field: "analysis.max_paths".to_string(),
                    message: "must be at least 1".to_string(),
                });
            }
        }
        if let Some(size) = config.storage.read_pool_size {
            if size == 0 {
                return Err(ConfigError::ValidationFailed {
                    field: "storage.read_pool_size".to_string(),
                    message: "must be at least 1".to_string(),
                });
            }
        }
        Ok(())
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are silently ignored (forward-compatible).
    fn merge_toml_file(config: &mut VantageConfig, path: &Path) -> Result<(), ConfigError> {
        let content =
            std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
                path: path.display().to_string(),
            })?;

        let file_config: VantageConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`, where `other` values override `base` values
    /// only when `other` has a `Some` value.
    fn merge(base: &mut VantageConfig, other: &VantageConfig) {
        if other.build.account_timeout_secs.is_some() {
            base.build.account_timeout_secs = other.build.account_timeout_secs;
        }
        if other.build.mirror_enabled.is_some() {
            base.build.mirror_enabled = other.build.mirror_enabled;
        }

        if other.analysis.max_path_length.is_some() {
            base.analysis.max_path_length = other.analysis.max_path_length;
        }
        if other.analysis.max_paths.is_some() {
            base.analysis.max_paths = other.analysis.max_paths;
        }
        if other.analysis.high_risk_limit.is_some() {
            base.analysis.high_risk_limit = other.analysis.high_risk_limit;
        }
        if other.analysis.deep_path_hop_limit.is_some() {
            base.analysis.deep_path_hop_limit = other.analysis.deep_path_hop_limit;
        }

        if other.storage.path.is_some() {
            base.storage.path = other.storage.path.clone();
        }
        if other.storage.read_pool_size.is_some() {
            base.storage.read_pool_size = other.storage.read_pool_size;
        }
    }

    /// Apply environment variable overrides.
    /// Pattern: `VANTAGE_BUILD_ACCOUNT_TIMEOUT_SECS`, `VANTAGE_ANALYSIS_MAX_PATH_LENGTH`, etc.
    fn apply_env_overrides(config: &mut VantageConfig) {
        if let Ok(val) = std::env::var("VANTAGE_BUILD_ACCOUNT_TIMEOUT_SECS") {
            if let Ok(v) = val.parse::<u64>() {
                config.build.account_timeout_secs = Some(v);
            }
        }
        if let Ok(val) = std::env::var("VANTAGE_BUILD_MIRROR_ENABLED") {
            if let Ok(v) = val.parse::<bool>() {
                config.build.mirror_enabled = Some(v);
            }
        }
        if let Ok(val) = std::env::var("VANTAGE_ANALYSIS_MAX_PATH_LENGTH") {
            if let Ok(v) = val.parse::<u32>() {
                config.analysis.max_path_length = Some(v);
            }
        }
        if let Ok(val) = std::env::var("VANTAGE_ANALYSIS_MAX_PATHS") {
            if let Ok(v) = val.parse::<usize>() {
                config.analysis.max_paths = Some(v);
            }
        }
        if let Ok(val) = std::env::var("VANTAGE_ANALYSIS_HIGH_RISK_LIMIT") {
            if let Ok(v) = val.parse::<usize>() {
                config.analysis.high_risk_limit = Some(v);
            }
        }
        if let Ok(val) = std::env::var("VANTAGE_ANALYSIS_DEEP_PATH_HOP_LIMIT") {
            if let Ok(v) = val.parse::<u32>() {
                config.analysis.deep_path_hop_limit = Some(v);
            }
        }
        if let Ok(val) = std::env::var("VANTAGE_STORAGE_PATH") {
            config.storage.path = Some(val);
        }
        if let Ok(val) = std::env::var("VANTAGE_STORAGE_READ_POOL_SIZE") {
            if let Ok(v) = val.parse::<usize>() {
                config.storage.read_pool_size = Some(v);
            }
        }
    }
}

/// Returns the user config path: `~/.vantage/config.toml`.
fn user_config_path() -> Option<std::path::PathBuf> {
    home_dir().map(|h| h.join(".vantage").join("config.toml"))
}

/// Cross-platform home directory resolution.
fn home_dir() -> Option<std::path::PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(std::path::PathBuf::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let config = VantageConfig::default();
        assert_eq!(config.analysis.max_path_length(), 5);
        assert_eq!(config.analysis.max_paths(), 20);
        assert_eq!(config.analysis.high_risk_limit(), 10);
        assert_eq!(config.build.account_timeout(), Duration::from_secs(30));
        assert!(config.build.mirror_enabled());
    }

    #[test]
    fn from_toml_overrides_subset() {
        let config = VantageConfig::from_toml(
            r#"
            [analysis]
            max_path_length = 3

            [build]
            account_timeout_secs = 5
            "#,
        )
        .unwrap();
        assert_eq!(config.analysis.max_path_length(), 3);
        assert_eq!(config.analysis.max_paths(), 20);
        assert_eq!(config.build.account_timeout(), Duration::from_secs(5));
    }

    #[test]
    fn zero_hop_limit_rejected() {
        let err = VantageConfig::from_toml("[analysis]\nmax_path_length = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::ValidationFailed { .. }));
    }
}
