//! Configuration loading and typed config structures for the harvest engine.
//!
//! The canonical configuration lives in `reap-config.yaml` at the project
//! root. Every field has a default, so an empty file (or no `harvest`
//! section at all) yields the stock behaviour: no extra crops, no hoe
//! required, no tool damage, no experience, sound on, multi-harvest from
//! wood tools with a 1x1 area that never grows.
//!
//! The harvest section is read once and handed to the orchestrator as a
//! snapshot on every call.

use std::path::Path;

use reap_types::BlockId;
use serde::Deserialize;

use crate::area::{AreaSize, AreaStep};
use crate::tier::{TierResolver, TierThreshold};

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// A value parsed but is not acceptable.
    #[error("invalid value for `{field}`: {reason}")]
    Invalid {
        /// Dotted path of the offending key.
        field: String,
        /// What is wrong with it.
        reason: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ReapConfig {
    /// Harvest behaviour.
    #[serde(default)]
    pub harvest: HarvestConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ReapConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        // An empty document deserializes as unit, not as an empty map.
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yml::from_str(yaml)?)
    }
}

/// Harvest behaviour switches.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HarvestConfig {
    /// Extra block identities treated as crops on top of the built-in kinds.
    #[serde(default)]
    pub crops: Vec<BlockId>,

    /// Whether a hoe must be held to harvest.
    #[serde(default)]
    pub require_hoe: bool,

    /// Durability taken from the hoe per harvested cell. Only applies when
    /// `require_hoe` is set.
    #[serde(default)]
    pub damage_on_harvest: u32,

    /// Experience granted per harvested cell.
    #[serde(default)]
    pub granted_exp: u32,

    /// Whether the crop's break sound plays on harvest.
    #[serde(default = "default_true")]
    pub play_sound: bool,

    /// Lowest hoe tier that multi-harvests, or `"none"` to let every hoe
    /// multi-harvest.
    #[serde(default = "default_starting_tier")]
    pub multi_harvest_starting_tier: String,

    /// Side of the area at the starting tier.
    #[serde(default)]
    pub starting_area_size: AreaSize,

    /// Side growth per tier above the starting one.
    #[serde(default)]
    pub area_increment_step: AreaStep,
}

impl Default for HarvestConfig {
    fn default() -> Self {
        Self {
            crops: Vec::new(),
            require_hoe: false,
            damage_on_harvest: 0,
            granted_exp: 0,
            play_sound: true,
            multi_harvest_starting_tier: default_starting_tier(),
            starting_area_size: AreaSize::default(),
            area_increment_step: AreaStep::default(),
        }
    }
}

impl HarvestConfig {
    /// Parse a YAML document holding only the harvest section's keys.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yml::from_str(yaml)?)
    }

    /// The starting tier as a threshold.
    pub fn threshold(&self) -> TierThreshold {
        TierThreshold::parse(&self.multi_harvest_starting_tier)
    }

    /// Whether `block` is in the extra crop list.
    pub fn lists_crop(&self, block: &BlockId) -> bool {
        self.crops.contains(block)
    }

    /// Check values that parse but make no sense.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] for a blank crop identity or a
    /// starting tier that is neither `"none"` nor in `tiers`.
    pub fn validate(&self, tiers: &TierResolver) -> Result<(), ConfigError> {
        if let Some(index) = self
            .crops
            .iter()
            .position(|crop| crop.as_str().trim().is_empty())
        {
            return Err(ConfigError::Invalid {
                field: format!("harvest.crops[{index}]"),
                reason: "crop identity is blank".to_owned(),
            });
        }

        if let TierThreshold::Tier(label) = self.threshold()
            && tiers.find(&label).is_none()
        {
            let known: Vec<&str> = tiers.names().collect();
            return Err(ConfigError::Invalid {
                field: "harvest.multi_harvest_starting_tier".to_owned(),
                reason: format!(
                    "unknown tier `{label}`, expected `none` or one of: {}",
                    known.join(", ")
                ),
            });
        }

        Ok(())
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

// ---------------------------------------------------------------------------
// Default value functions for serde
// ---------------------------------------------------------------------------

fn default_starting_tier() -> String {
    "wood".to_owned()
}

fn default_log_level() -> String {
    "info".to_owned()
}

const fn default_true() -> bool {
    true
}
