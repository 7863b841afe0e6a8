//! `flowdist.toml` configuration.
//!
//! ```toml
//! [split]
//! freight_rate_per_unit = 500.0
//! tolerance = 0.01
//!
//! [views]
//! page_size = 10
//! ```
//!
//! Every key is optional; omitted keys take their defaults.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use flow_model::{SplitConfig, ViewConfig};
use flow_split::SplitCalculator;

use crate::error::ConfigError;

/// File name looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "flowdist.toml";

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FlowConfig {
    pub split: SplitConfig,
    pub views: ViewConfig,
}

impl FlowConfig {
    /// Read and validate a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&text).map_err(|source| ConfigError::Toml {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        debug!(path = %path.display(), ?config, "config loaded");
        Ok(config)
    }

    /// Load an explicit path, or `flowdist.toml` when it exists, or defaults.
    ///
    /// An explicit path that does not exist is an error.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => {
                let fallback = Path::new(DEFAULT_CONFIG_FILE);
                if fallback.is_file() {
                    Self::load(fallback)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let rate = self.split.freight_rate_per_unit;
        if !rate.is_finite() || rate < 0.0 {
            return Err(ConfigError::Invalid {
                key: "split.freight_rate_per_unit",
                message: format!("expected a non-negative number, got {rate}"),
            });
        }
        let tolerance = self.split.tolerance;
        if !tolerance.is_finite() || tolerance <= 0.0 {
            return Err(ConfigError::Invalid {
                key: "split.tolerance",
                message: format!("expected a positive number, got {tolerance}"),
            });
        }
        if self.views.page_size == 0 {
            return Err(ConfigError::Invalid {
                key: "views.page_size",
                message: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    pub fn calculator(&self) -> SplitCalculator {
        SplitCalculator::new(self.split)
    }
}
