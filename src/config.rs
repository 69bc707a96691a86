//! Configuration for the terminal monitor.
//!
//! YAML file with per-field defaults; a missing file falls back to the
//! stock pipeline. Values are validated at load time so a bad cadence,
//! capacity, or threshold fails before the controller is built.

use crate::controller::PipelineSettings;
use crate::detect::Threshold;
use crate::error::{Result, TemblorError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Pipeline settings section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlobalConfig {
    /// Tick cadence in milliseconds.
    #[serde(default = "default_update_ms")]
    pub update_ms: u64,

    /// Number of samples retained for the waveform display.
    #[serde(default = "default_window_capacity")]
    pub window_capacity: usize,

    /// Starting detection threshold.
    #[serde(default = "default_threshold")]
    pub threshold: f64,

    /// Seed for the synthetic ground-motion source.
    #[serde(default = "default_seed")]
    pub seed: u64,
}

fn default_update_ms() -> u64 {
    30
}
fn default_window_capacity() -> usize {
    200
}
fn default_threshold() -> f64 {
    Threshold::DEFAULT
}
fn default_seed() -> u64 {
    42
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            update_ms: default_update_ms(),
            window_capacity: default_window_capacity(),
            threshold: default_threshold(),
            seed: default_seed(),
        }
    }
}

/// Theme section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThemeConfig {
    /// Name of the built-in palette to render with.
    #[serde(default = "default_theme_name")]
    pub name: String,
}

fn default_theme_name() -> String {
    "default".to_string()
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self { name: default_theme_name() }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Configuration version.
    #[serde(default = "default_version")]
    pub version: u32,

    /// Pipeline settings.
    #[serde(default)]
    pub global: GlobalConfig,

    /// Theme selection.
    #[serde(default)]
    pub theme: ThemeConfig,
}

fn default_version() -> u32 {
    1
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: default_version(),
            global: GlobalConfig::default(),
            theme: ThemeConfig::default(),
        }
    }
}

impl Config {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads and validates configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or holds
    /// out-of-range values.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path)
            .map_err(|_| TemblorError::ConfigNotFound { path: path.display().to_string() })?;

        Self::parse(&content)
    }

    /// Parses and validates configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns an error with line number if parsing fails, or a
    /// [`TemblorError::ConfigInvalid`] naming the offending key.
    pub fn parse(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml_ng::from_str(yaml).map_err(|e| {
            let line = e.location().map(|l| l.line()).unwrap_or(0);
            TemblorError::ConfigParse {
                line,
                message: e.to_string(),
            }
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that every value can actually drive the pipeline.
    ///
    /// # Errors
    ///
    /// Returns [`TemblorError::ConfigInvalid`] for a zero cadence, a zero
    /// window capacity, or a threshold outside the accepted range.
    pub fn validate(&self) -> Result<()> {
        if self.global.update_ms == 0 {
            return Err(TemblorError::ConfigInvalid {
                key: "update_ms".to_string(),
                message: "must be positive".to_string(),
            });
        }
        if self.global.window_capacity == 0 {
            return Err(TemblorError::ConfigInvalid {
                key: "window_capacity".to_string(),
                message: "must be positive".to_string(),
            });
        }
        if Threshold::try_new(self.global.threshold).is_err() {
            return Err(TemblorError::ConfigInvalid {
                key: "threshold".to_string(),
                message: format!(
                    "{} is outside [{}, {}]",
                    self.global.threshold,
                    Threshold::MIN,
                    Threshold::MAX
                ),
            });
        }
        Ok(())
    }

    /// Returns the tick cadence as a Duration.
    #[must_use]
    pub fn update_interval(&self) -> Duration {
        Duration::from_millis(self.global.update_ms)
    }

    /// Converts the file values into controller construction parameters.
    #[must_use]
    pub fn pipeline_settings(&self) -> PipelineSettings {
        PipelineSettings {
            window_capacity: self.global.window_capacity,
            threshold: self.global.threshold,
            tick_interval: self.update_interval(),
            ..PipelineSettings::default()
        }
    }

    /// Loads configuration with fallback to defaults.
    #[must_use]
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(path).unwrap_or_default()
    }

    /// Default config file location: `<config dir>/temblor/config.yaml`.
    #[must_use]
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .map(|p| p.join("temblor").join("config.yaml"))
            .unwrap_or_default()
    }
}
