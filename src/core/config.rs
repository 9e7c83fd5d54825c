//! Simulation configuration with documented constants
//!
//! All tuning values are collected here with notes on what they control.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::{Result, SimError};

/// Top-level configuration for a simulation run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub map: MapConfig,
    pub politics: PoliticsConfig,
    /// Number of ticks to simulate per run
    pub ticks: u64,
}

/// World generation parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    /// Grid height in cells
    pub rows: u32,
    /// Grid width in cells
    pub cols: u32,
    /// Number of continent seed points scattered over the map
    pub continents: u32,
    /// RNG seed for the whole run
    pub seed: u64,
}

/// Political dynamics parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PoliticsConfig {
    /// States seeded at world creation
    pub initial_states: u32,

    /// Chance per tick that a state with negative stability spawns a
    /// breakaway cluster
    pub separatism_chance: f32,

    /// Exact number of cells a breakaway cluster must reach; fewer
    /// reachable cells aborts the secession entirely
    pub cluster_size: usize,

    /// Ticks a separatist counts down before resolution
    pub separatist_timer: i32,

    /// Minimum territory at timer expiry for independence; below this the
    /// separatist is suppressed
    pub independence_threshold: usize,

    /// Upper bound on independent-state battles per tick; guaranteed
    /// parent-separatist battles are not counted against it
    pub max_battles: u32,

    /// Largest capital-less component that gets absorbed by a neighbor
    pub absorption_threshold: usize,

    /// Maximum distance from the members' mean power for union admission
    pub union_power_margin: i32,

    /// Power never drifts below this floor
    pub power_floor: i32,

    /// Per-tick drift is drawn uniformly from [-drift_magnitude, +drift_magnitude]
    pub drift_magnitude: i32,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            rows: 50,
            cols: 80,
            continents: 25,
            seed: 12345,
        }
    }
}

impl Default for PoliticsConfig {
    fn default() -> Self {
        Self {
            initial_states: 25,
            separatism_chance: 0.25,
            cluster_size: 5,
            separatist_timer: 5,
            independence_threshold: 5,
            max_battles: 5,
            absorption_threshold: 3,
            union_power_margin: 10,
            power_floor: 10,
            drift_magnitude: 3,
        }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            map: MapConfig::default(),
            politics: PoliticsConfig::default(),
            ticks: 50,
        }
    }
}

impl SimulationConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a configuration from a TOML file
    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&text)?;
        Ok(config)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.map.rows < 10 || self.map.cols < 10 {
            return Err(SimError::InvalidConfig(format!(
                "map must be at least 10x10 cells, got {}x{}",
                self.map.rows, self.map.cols
            )));
        }

        if self.politics.initial_states == 0 {
            return Err(SimError::InvalidConfig(
                "initial_states must be at least 1".into(),
            ));
        }

        if !(0.0..=1.0).contains(&self.politics.separatism_chance) {
            return Err(SimError::InvalidConfig(format!(
                "separatism_chance must lie in [0, 1], got {}",
                self.politics.separatism_chance
            )));
        }

        if self.politics.cluster_size == 0 {
            return Err(SimError::InvalidConfig(
                "cluster_size must be at least 1".into(),
            ));
        }

        if self.politics.power_floor < 1 {
            return Err(SimError::InvalidConfig(
                "power_floor must be at least 1".into(),
            ));
        }

        if self.politics.drift_magnitude < 0 {
            return Err(SimError::InvalidConfig(
                "drift_magnitude must be non-negative".into(),
            ));
        }

        Ok(())
    }
}
