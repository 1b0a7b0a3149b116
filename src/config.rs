//! Airlock configuration parameters.
//!
//! Block names the external discovery layer binds, readiness thresholds for
//! the pressurization cycle, and the control-loop period. Every field has a
//! default matching the reference deployment, so a partial JSON document is
//! enough to override a single value.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Names of the collaborators the airlock expects to find.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlockNames {
    pub inner_door: String,
    pub outer_door: String,
    pub inner_sensor: String,
    pub outer_sensor: String,
    pub vent: String,
    pub tank: String,
    /// Group holding the status panels (optional collaborators).
    pub display_group: String,
    /// Title written to every panel at startup.
    pub panel_title: String,
}

impl Default for BlockNames {
    fn default() -> Self {
        Self {
            inner_door: "Inner pressure door".into(),
            outer_door: "Outer pressure door".into(),
            inner_sensor: "Sensor inner door".into(),
            outer_sensor: "Sensor outer door".into(),
            vent: "Air vent airlock".into(),
            tank: "Oxygen tank airlock".into(),
            display_group: "LCD panels airlock".into(),
            panel_title: "LCD panel airlock".into(),
        }
    }
}

/// Core airlock configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AirlockConfig {
    pub names: BlockNames,

    // --- Vacuum side (outer door) ---
    /// Oxygen fraction at or below which the chamber counts as vacuum.
    pub vacuum_oxygen_max: f32,
    /// Tank fill at or above which the chamber counts as drained
    /// (the vent has nowhere left to push air).
    pub vacuum_tank_min: f32,

    // --- Atmosphere side (inner door) ---
    /// Oxygen fraction at or above which the chamber counts as pressurized.
    pub atmosphere_oxygen_min: f32,
    /// Tank fill at or below which the chamber counts as refilled
    /// (the tank has nothing left to give).
    pub atmosphere_tank_max: f32,

    // --- Timing ---
    /// Period of the external scheduler driving `tick()` (milliseconds).
    pub tick_interval_ms: u32,
}

impl Default for AirlockConfig {
    fn default() -> Self {
        Self {
            names: BlockNames::default(),
            vacuum_oxygen_max: 0.001,
            vacuum_tank_min: 0.999,
            atmosphere_oxygen_min: 0.999,
            atmosphere_tank_max: 0.001,
            tick_interval_ms: 1600,
        }
    }
}

impl AirlockConfig {
    /// Parse a JSON document and validate it. Missing fields take defaults.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text).map_err(|e| {
            log::warn!("config parse failed: {e}");
            ConfigError::Parse
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Range-check every field. Invalid values are rejected, never clamped.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fractions = [
            (self.vacuum_oxygen_max, "vacuum_oxygen_max must be within [0, 1]"),
            (self.vacuum_tank_min, "vacuum_tank_min must be within [0, 1]"),
            (self.atmosphere_oxygen_min, "atmosphere_oxygen_min must be within [0, 1]"),
            (self.atmosphere_tank_max, "atmosphere_tank_max must be within [0, 1]"),
        ];
        for (value, reason) in fractions {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::ValidationFailed(reason));
            }
        }
        if self.vacuum_oxygen_max >= self.atmosphere_oxygen_min {
            return Err(ConfigError::ValidationFailed(
                "vacuum_oxygen_max must be below atmosphere_oxygen_min",
            ));
        }
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::ValidationFailed("tick_interval_ms must be > 0"));
        }
        Ok(())
    }
}
