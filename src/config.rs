//! Bridge configuration, loaded from the platform config directory with
//! compiled defaults as fallback.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use thiserror::Error;
use tracing::info;

use crate::telemetry::scale::ScalingRange;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Read(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Deserialize, Serialize, Clone, Debug, Default)]
#[serde(default)]
pub struct BridgeConfig {
    pub source: SourceConfig,
    pub device: DeviceConfig,
    pub scaling: ScalingConfig,
}

/// The external process whose stdout carries the telemetry lines.
#[derive(Deserialize, Serialize, Clone, Debug)]
#[serde(default)]
pub struct SourceConfig {
    pub command: String,
    pub args: Vec<String>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            command: "adb".to_string(),
            args: vec!["logcat".to_string(), "-v".to_string(), "time".to_string()],
        }
    }
}

impl SourceConfig {
    pub fn describe(&self) -> String {
        format!("{} {}", self.command, self.args.join(" "))
    }
}

#[derive(Deserialize, Serialize, Clone, Debug)]
#[serde(default)]
pub struct DeviceConfig {
    /// Device name shown to applications reading the virtual joystick.
    pub name: String,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            name: "Telemetry Bridge Joystick".to_string(),
        }
    }
}

/// Raw-unit ranges of the physical sensors. The defaults match the device
/// this bridge was written for and must be respected for compatibility.
#[derive(Deserialize, Serialize, Clone, Copy, Debug)]
#[serde(default)]
pub struct ScalingConfig {
    pub stick: ScalingRange,
    pub wheel: ScalingRange,
}

impl Default for ScalingConfig {
    fn default() -> Self {
        Self {
            stick: ScalingRange::new(359, 1689),
            wheel: ScalingRange::new(724, 1324),
        }
    }
}

impl BridgeConfig {
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("joybridge").join("config.toml"))
    }

    /// Loads the config file if present, otherwise compiled defaults.
    pub fn load_or_default() -> Result<Self, ConfigError> {
        let Some(path) = Self::config_path() else {
            return Ok(Self::default());
        };

        if !path.exists() {
            info!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let text = fs::read_to_string(&path)?;
        let config: Self = toml::from_str(&text)?;
        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Rejects scaling ranges that cannot be normalized.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, range) in [("stick", self.scaling.stick), ("wheel", self.scaling.wheel)] {
            if range.min >= range.max {
                return Err(ConfigError::Invalid(format!(
                    "{} range must satisfy min < max, got ({}, {})",
                    name, range.min, range.max
                )));
            }
        }
        Ok(())
    }
}
