//! Ghost configuration (ghostride.toml)
//!
//! Interpolation gates and the physics constants needed to decode states.
//! Every field is optional; missing ones take their default.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::GameTime;
use crate::bike::PhysicsSettings;
use crate::error::ConfigError;

/// Ghost playback configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GhostConfig {
    /// Interpolate between recorded states (default: true)
    #[serde(default = "default_true")]
    pub interpolation: bool,
    /// Widest state interval still interpolated, in hundredths (default: 300)
    #[serde(default = "default_max_interpolation_time")]
    pub max_interpolation_time: GameTime,
    /// Largest frame jump still interpolated (default: 5.0)
    #[serde(default = "default_max_interpolation_distance")]
    pub max_interpolation_distance: f32,
    /// Physics constants
    #[serde(default)]
    pub physics: PhysicsSettings,
}

fn default_true() -> bool {
    true
}
fn default_max_interpolation_time() -> GameTime {
    300.0
}
fn default_max_interpolation_distance() -> f32 {
    5.0
}

impl Default for GhostConfig {
    fn default() -> Self {
        Self {
            interpolation: default_true(),
            max_interpolation_time: default_max_interpolation_time(),
            max_interpolation_distance: default_max_interpolation_distance(),
            physics: PhysicsSettings::default(),
        }
    }
}

impl GhostConfig {
    /// Parse a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Read and parse a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }
}
