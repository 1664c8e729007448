//! Mixer configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Sizing and tolerance settings shared by every channel of a mixer.
///
/// Every field has a default, so an empty file is a valid configuration.
///
/// # TOML Format
///
/// ```toml
/// block_length = 4096
/// send_slots = 9
/// post_fader_start_slot = 6
/// unity_epsilon = 0.00001
/// midi_event_capacity = 128
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MixerConfig {
    /// Samples per port buffer; the engine never asks for a longer block.
    pub block_length: usize,
    /// Sends per channel.
    pub send_slots: usize,
    /// First post-fader slot; lower slots tap the pre-fader signal.
    pub post_fader_start_slot: usize,
    /// How close to 1.0 a send amount must be to take the straight-copy path.
    pub unity_epsilon: f32,
    /// Events preallocated per MIDI port.
    pub midi_event_capacity: usize,
}

impl Default for MixerConfig {
    fn default() -> Self {
        Self {
            block_length: 4096,
            send_slots: 9,
            post_fader_start_slot: 6,
            unity_epsilon: 0.00001,
            midi_event_capacity: 128,
        }
    }
}

impl MixerConfig {
    /// Parse and validate a TOML string.
    pub fn from_toml_str(toml_str: &str) -> Result<Self, ConfigError> {
        let config: MixerConfig = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!("mixer config loaded from {}", path.display());
        Ok(config)
    }

    /// Save the configuration as TOML.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|e| ConfigError::write_file(path, e))?;
        Ok(())
    }

    /// Checks value ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.block_length == 0 {
            return Err(ConfigError::invalid("block_length must be > 0"));
        }
        if self.midi_event_capacity == 0 {
            return Err(ConfigError::invalid("midi_event_capacity must be > 0"));
        }
        if self.send_slots > usize::from(u8::MAX) {
            return Err(ConfigError::invalid(format!(
                "send_slots must be <= {}, got {}",
                u8::MAX,
                self.send_slots
            )));
        }
        if self.post_fader_start_slot > self.send_slots {
            return Err(ConfigError::invalid(format!(
                "post_fader_start_slot ({}) exceeds send_slots ({})",
                self.post_fader_start_slot, self.send_slots
            )));
        }
        if !self.unity_epsilon.is_finite() || self.unity_epsilon < 0.0 {
            return Err(ConfigError::invalid(format!(
                "unity_epsilon must be finite and >= 0, got {}",
                self.unity_epsilon
            )));
        }
        Ok(())
    }
}
