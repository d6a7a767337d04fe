//! Index configuration via `memvec.toml`
//!
//! The settings apply to every collection a `VectorDatabase` creates.
//! Callers that keep a config file next to their data load it with
//! [`IndexConfig::from_file`]; everyone else uses the defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use memvec_core::{VectorError, VectorResult};

/// Config file name callers conventionally use
pub const CONFIG_FILE_NAME: &str = "memvec.toml";

/// Default number of results returned when a query sets no limit
pub const DEFAULT_SEARCH_LIMIT: usize = 100;

/// Largest `initial_capacity` accepted, in rows
pub const MAX_INITIAL_CAPACITY: usize = 1 << 24;

/// Index configuration loaded from `memvec.toml`.
///
/// # Example
///
/// ```toml
/// default_limit = 100
/// initial_capacity = 0
/// reject_non_finite = true
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexConfig {
    /// Result count used when `SearchOptions::limit` is unset. Must be > 0.
    #[serde(default = "default_limit")]
    pub default_limit: usize,
    /// Rows reserved up front when a collection is created.
    /// At most [`MAX_INITIAL_CAPACITY`].
    #[serde(default)]
    pub initial_capacity: usize,
    /// Reject NaN and infinite components in stored and query vectors.
    #[serde(default = "default_reject_non_finite")]
    pub reject_non_finite: bool,
}

fn default_limit() -> usize {
    DEFAULT_SEARCH_LIMIT
}

fn default_reject_non_finite() -> bool {
    true
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
            initial_capacity: 0,
            reject_non_finite: default_reject_non_finite(),
        }
    }
}

impl IndexConfig {
    /// Check value ranges
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if `default_limit` is 0 or
    /// `initial_capacity` exceeds [`MAX_INITIAL_CAPACITY`].
    pub fn validate(&self) -> VectorResult<()> {
        if self.default_limit == 0 {
            return Err(VectorError::InvalidConfig(
                "default_limit must be greater than 0".to_string(),
            ));
        }
        if self.initial_capacity > MAX_INITIAL_CAPACITY {
            return Err(VectorError::InvalidConfig(format!(
                "initial_capacity {} exceeds the maximum of {} rows",
                self.initial_capacity, MAX_INITIAL_CAPACITY
            )));
        }
        Ok(())
    }

    /// Returns the default config file content with comments.
    pub fn default_toml() -> &'static str {
        r#"# memvec index configuration
#
# Number of results returned when a query does not set a limit (default: 100)
default_limit = 100

# Rows reserved when a collection is created (default: 0, max: 16777216)
initial_capacity = 0

# Reject NaN and infinite vector components (default: true)
reject_non_finite = true
"#
    }

    /// Parse config from TOML text.
    pub fn from_toml_str(content: &str) -> VectorResult<Self> {
        let config: IndexConfig = toml::from_str(content)
            .map_err(|e| VectorError::InvalidConfig(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse config from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated.
    pub fn from_file(path: &Path) -> VectorResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            VectorError::InvalidConfig(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_toml_str(&content).map_err(|e| match e {
            VectorError::InvalidConfig(msg) => {
                VectorError::InvalidConfig(format!("{} ({})", msg, path.display()))
            }
            other => other,
        })
    }

    /// Write the default config file if it does not already exist.
    ///
    /// Returns `Ok(())` whether the file was created or already existed.
    pub fn write_default_if_missing(path: &Path) -> VectorResult<()> {
        if !path.exists() {
            std::fs::write(path, Self::default_toml()).map_err(|e| {
                VectorError::InvalidConfig(format!(
                    "Failed to write default config file '{}': {}",
                    path.display(),
                    e
                ))
            })?;
        }
        Ok(())
    }

    /// Serialize this config to TOML and write it to the given path.
    pub fn write_to_file(&self, path: &Path) -> VectorResult<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| VectorError::InvalidConfig(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, content).map_err(|e| {
            VectorError::InvalidConfig(format!(
                "Failed to write config file '{}': {}",
                path.display(),
                e
            ))
        })
    }
}
