//! Configuration for setflow
//!
//! This module provides:
//!
//! - Generic YAML config loading/saving
//! - The [`SetflowConfig`] settings shared by every host of the validator
//! - Default config paths
//!
//! # Usage
//!
//! ```ignore
//! use setflow_core::config::{default_config_path, load_config, save_config, SetflowConfig};
//!
//! let path = default_config_path();
//! let config: SetflowConfig = load_config(&path);
//! save_config(&config, &path)?;
//! ```

mod io;
mod paths;

pub use io::{load_config, save_config};
pub use paths::{default_config_dir, default_config_path};

use serde::{Deserialize, Serialize};

use crate::types::{EnergyScale, DEFAULT_MINUTES_PER_TRACK};

/// Root configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SetflowConfig {
    /// Top of the energy scale sets are rated on (6 or 10 in practice)
    pub energy_max: EnergyScale,
    /// Average track length used for set duration estimates
    pub minutes_per_track: f32,
}

impl Default for SetflowConfig {
    fn default() -> Self {
        Self {
            energy_max: EnergyScale::SIX,
            minutes_per_track: DEFAULT_MINUTES_PER_TRACK,
        }
    }
}

impl SetflowConfig {
    /// Energy scale for sets that don't declare their own
    pub fn energy_scale(&self) -> EnergyScale {
        self.energy_max
    }
}
