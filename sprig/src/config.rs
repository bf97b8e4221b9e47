use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// How the per-tick step multiplier is derived from frame time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeStep {
    /// Every tick advances by exactly one unit, regardless of frame time.
    #[default]
    Fixed,
    /// Each tick advances by the elapsed frame time in milliseconds.
    RealTime,
}

impl TimeStep {
    /// Step multiplier for a tick that took `elapsed`.
    pub fn step(&self, elapsed: Duration) -> f32 {
        match self {
            TimeStep::Fixed => 1.0,
            TimeStep::RealTime => elapsed.as_secs_f32() * 1000.0,
        }
    }
}

/// Runtime settings for a [`Scene`](crate::scene::Scene).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub time_step: TimeStep,
    /// Analog stick magnitude below which input counts as centered.
    pub stick_dead_zone: f32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            time_step: TimeStep::Fixed,
            stick_dead_zone: 0.3,
        }
    }
}

impl SimulationConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_time_step(mut self, time_step: TimeStep) -> Self {
        self.time_step = time_step;
        self
    }

    #[must_use]
    pub fn with_stick_dead_zone(mut self, dead_zone: f32) -> Self {
        self.stick_dead_zone = dead_zone;
        self
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse settings from JSON. Missing fields take their default value.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load_from_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}
