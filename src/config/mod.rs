//! Configuration file support for rustydoom.
//!
//! This module handles loading and validating settings from the configuration
//! file located at `~/.config/rustydoom/config.toml`. Settings cover the input
//! queue and engine pacing; the key mapping itself is fixed and not
//! configurable.
//!
//! If no config file exists, defaults are used automatically.

pub mod types;

pub use types::{EngineConfig, InputConfig};

use anyhow::{Context, Result};
use log::{debug, info};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const QUEUE_CAPACITY_RANGE: std::ops::RangeInclusive<usize> = 2..=65_536;
const TICK_RATE_RANGE: std::ops::RangeInclusive<u32> = 1..=1000;

/// Main configuration structure containing all user settings.
///
/// # Example TOML
/// ```toml
/// [input]
/// queue_capacity = 256
/// drop_log_interval = 64
///
/// [engine]
/// iwad = "/usr/share/games/doom/doom1.wad"
/// tick_rate_hz = 35
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, JsonSchema)]
pub struct Config {
    /// Input queue settings
    #[serde(default)]
    pub input: InputConfig,

    /// Engine start-up and pacing
    #[serde(default)]
    pub engine: EngineConfig,
}

impl Config {
    /// Validates and clamps all configuration values to acceptable ranges.
    ///
    /// Validated ranges:
    /// - `queue_capacity`: 2 - 65536
    /// - `drop_log_interval`: at least 1
    /// - `tick_rate_hz`: 1 - 1000
    fn validate_and_clamp(&mut self) {
        if !QUEUE_CAPACITY_RANGE.contains(&self.input.queue_capacity) {
            log::warn!(
                "Invalid queue_capacity {}, clamping to {}-{} range",
                self.input.queue_capacity,
                QUEUE_CAPACITY_RANGE.start(),
                QUEUE_CAPACITY_RANGE.end()
            );
            self.input.queue_capacity = self
                .input
                .queue_capacity
                .clamp(*QUEUE_CAPACITY_RANGE.start(), *QUEUE_CAPACITY_RANGE.end());
        }

        if self.input.drop_log_interval == 0 {
            log::warn!("Invalid drop_log_interval 0, using 1");
            self.input.drop_log_interval = 1;
        }

        if !TICK_RATE_RANGE.contains(&self.engine.tick_rate_hz) {
            log::warn!(
                "Invalid tick_rate_hz {}, clamping to {}-{} range",
                self.engine.tick_rate_hz,
                TICK_RATE_RANGE.start(),
                TICK_RATE_RANGE.end()
            );
            self.engine.tick_rate_hz = self
                .engine
                .tick_rate_hz
                .clamp(*TICK_RATE_RANGE.start(), *TICK_RATE_RANGE.end());
        }
    }

    /// Returns the path to the configuration file.
    ///
    /// The config file is located at `~/.config/rustydoom/config.toml`.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined (e.g., HOME not set).
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("rustydoom");

        Ok(config_dir.join("config.toml"))
    }

    /// Loads configuration from the default location, or returns defaults if
    /// no file exists.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::get_config_path()?)
    }

    /// Loads configuration from `config_path`, or returns defaults if the file
    /// does not exist. Loaded values are validated and clamped.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The file exists but cannot be read
    /// - The file exists but contains invalid TOML syntax
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            info!("Config file not found, using defaults");
            debug!("Expected config at: {}", config_path.display());
            return Ok(Self::default());
        }

        let config_str = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config from {}", config_path.display()))?;

        let mut config: Config = toml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config from {}", config_path.display()))?;

        config.validate_and_clamp();

        info!("Loaded config from {}", config_path.display());
        debug!("Config: {:?}", config);

        Ok(config)
    }

    /// Writes the default configuration to `config_path`.
    ///
    /// # Errors
    /// Returns an error if:
    /// - A config file already exists at the target path
    /// - The config directory cannot be created
    /// - The file cannot be written
    pub fn create_default_file(config_path: &Path) -> Result<()> {
        if config_path.exists() {
            return Err(anyhow::anyhow!(
                "Config file already exists at {}",
                config_path.display()
            ));
        }

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let config_str =
            toml::to_string_pretty(&Self::default()).context("Failed to serialize config")?;
        fs::write(config_path, config_str)
            .with_context(|| format!("Failed to write config to {}", config_path.display()))?;

        info!("Created default config at {}", config_path.display());
        Ok(())
    }

    /// JSON schema describing the configuration file.
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Config)
    }
}
