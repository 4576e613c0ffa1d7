//! Reader configuration loaded from YAML.
//!
//! ```yaml
//! store: /data/channel/inflow.h5
//! points:
//!   add_val_bot: 0.0
//!   exclude_top: 12
//!   exchange_val_top: 1.0
//! velocity:
//!   add_val_bot: 0.0
//!   exclude_top: 12
//!   interp_val_top: true
//! ```
//!
//! Every key is optional. A missing `add_val_*` or `exchange_val_*` means the
//! step is skipped.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{InflowError, Result};
use crate::layout::StoreLayout;
use crate::points::PointsOptions;
use crate::velocity::VelocityOptions;

/// Configuration for reading one inflow store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReaderConfig {
    /// Path to the HDF5 store.
    pub store: Option<PathBuf>,

    /// Group and dataset names inside the store.
    pub layout: StoreLayout,

    /// Reshaping applied to the coordinates.
    pub points: PointsOptions,

    /// Reshaping applied to every velocity snapshot.
    pub velocity: VelocityOptions,
}

impl ReaderConfig {
    /// Parse configuration from a YAML string.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a YAML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        Self::from_yaml_str(&contents)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        let values = [
            ("points.add_val_bot", self.points.add_val_bot),
            ("points.add_val_top", self.points.add_val_top),
            ("points.exchange_val_bot", self.points.exchange_val_bot),
            ("points.exchange_val_top", self.points.exchange_val_top),
            ("velocity.add_val_bot", self.velocity.add_val_bot),
            ("velocity.add_val_top", self.velocity.add_val_top),
        ];

        for (name, value) in values {
            if let Some(v) = value {
                if !v.is_finite() {
                    return Err(InflowError::config(format!(
                        "{} must be finite (omit the key to skip the step), got {}",
                        name, v
                    )));
                }
            }
        }

        Ok(())
    }
}
