//! Snapshots, history records, and run statistics

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::error::{Result, SimError};
use crate::core::types::Tick;
use crate::map::cell::Cell;
use crate::map::grid::HexGrid;
use crate::polity::state::{State, TickRecord, Union};
use crate::sim::world::World;

/// Bump when the snapshot layout changes; loads of other versions fail
/// loudly instead of being patched per-field
pub const SNAPSHOT_VERSION: u32 = 1;

/// Serializable world snapshot
///
/// RNG state is not persisted; restoring reseeds from the given seed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub version: u32,
    pub tick: Tick,
    pub rows: u32,
    pub cols: u32,
    pub cells: Vec<Cell>,
    pub states: Vec<State>,
    pub unions: Vec<Union>,
}

impl Snapshot {
    pub fn capture(world: &World) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            tick: world.tick,
            rows: world.grid.rows(),
            cols: world.grid.cols(),
            cells: world.grid.iter().cloned().collect(),
            states: world.states.clone(),
            unions: world.unions.clone(),
        }
    }

    /// Rebuild a live world, re-registering every state id
    pub fn restore(self, seed: u64) -> Result<World> {
        if self.version != SNAPSHOT_VERSION {
            return Err(SimError::SnapshotVersion(self.version));
        }
        let grid = HexGrid::from_cells(self.rows, self.cols, self.cells)?;
        let mut world = World::new(grid, seed);
        for state in &self.states {
            world.registry.register(state.id);
        }
        world.states = self.states;
        world.unions = self.unions;
        world.tick = self.tick;
        Ok(world)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }
}

/// Aggregate numbers for a finished run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunStats {
    pub ticks: u64,
    pub sim_time_ms: u64,
    pub states_at_start: usize,
    pub states_at_end: usize,
    pub secessions: usize,
    pub battles: usize,
    pub components_absorbed: usize,
}

impl RunStats {
    pub fn summary(&self) -> String {
        format!(
            "Simulated {} ticks in {}ms\n{} secessions, {} battles, {} states remain",
            self.ticks, self.sim_time_ms, self.secessions, self.battles, self.states_at_end,
        )
    }
}

/// Complete run artifact for downstream tooling
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunOutput {
    pub stats: RunStats,
    /// One record per live state per tick, in per-state append order
    pub records: Vec<TickRecord>,
    pub snapshot: Snapshot,
}

impl RunOutput {
    pub fn new(world: &World, stats: RunStats) -> Self {
        Self {
            stats,
            records: collect_records(world),
            snapshot: Snapshot::capture(world),
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}

/// Flatten every live state's history
pub fn collect_records(world: &World) -> Vec<TickRecord> {
    world
        .states
        .iter()
        .flat_map(|s| s.history.iter().cloned())
        .collect()
}

/// Helper for stats assembly in drivers
pub fn run_stats(
    world: &World,
    states_at_start: usize,
    secessions: usize,
    battles: usize,
    components_absorbed: usize,
    elapsed: Duration,
    ticks: u64,
) -> RunStats {
    RunStats {
        ticks,
        sim_time_ms: elapsed.as_millis() as u64,
        states_at_start,
        states_at_end: world.states.len(),
        secessions,
        battles,
        components_absorbed,
    }
}
