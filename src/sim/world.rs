//! Shared simulation world state
//!
//! One `World` value is owned by the tick driver and passed by reference to
//! every stage; stages read and mutate through it, never through globals.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::core::error::{Result, SimError};
use crate::core::types::{Coord, StateId, Tick};
use crate::map::grid::HexGrid;
use crate::polity::registry::StateRegistry;
use crate::polity::state::{State, Union};

pub struct World {
    pub grid: HexGrid,
    pub states: Vec<State>,
    pub registry: StateRegistry,
    pub unions: Vec<Union>,
    pub tick: Tick,
    /// Single deterministic RNG for the whole run
    pub rng: ChaCha8Rng,
}

impl World {
    pub fn new(grid: HexGrid, seed: u64) -> Self {
        Self {
            grid,
            states: Vec::new(),
            registry: StateRegistry::new(),
            unions: Vec::new(),
            tick: 0,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn state(&self, id: StateId) -> Option<&State> {
        self.states.iter().find(|s| s.id == id)
    }

    pub fn state_mut(&mut self, id: StateId) -> Option<&mut State> {
        self.states.iter_mut().find(|s| s.id == id)
    }

    pub fn live_ids(&self) -> Vec<StateId> {
        self.states.iter().map(|s| s.id).collect()
    }

    pub fn separatist_ids(&self) -> Vec<StateId> {
        self.states
            .iter()
            .filter(|s| s.is_separatist())
            .map(|s| s.id)
            .collect()
    }

    /// Mean power over all live states
    pub fn average_power(&self) -> f32 {
        if self.states.is_empty() {
            return 0.0;
        }
        let total: i64 = self.states.iter().map(|s| s.power as i64).sum();
        total as f32 / self.states.len() as f32
    }

    /// Drop a state from the live collection; its id stays used forever
    pub fn remove_state(&mut self, id: StateId) -> Option<State> {
        let pos = self.states.iter().position(|s| s.id == id)?;
        Some(self.states.remove(pos))
    }

    /// True if any cell of `a` is hex-adjacent to a cell of `b`
    pub fn states_border(&self, a: StateId, b: StateId) -> bool {
        let Some(sa) = self.state(a) else {
            return false;
        };
        sa.territory.iter().any(|c| {
            self.grid
                .hex_neighbors(*c)
                .iter()
                .any(|n| self.grid.cell(*n).owner == Some(b))
        })
    }

    /// Reassign one cell to `to`, keeping cell ownership, territory vectors,
    /// and capital references consistent
    ///
    /// An unknown target is skipped with a warning rather than aborting the
    /// surrounding stage.
    pub fn move_cell(&mut self, coord: Coord, to: StateId) {
        let Some(color) = self.state(to).map(|s| s.color.clone()) else {
            tracing::warn!(state = %to, "cell transfer skipped: unknown target state");
            return;
        };

        let old_owner = self.grid.cell(coord).owner;
        if old_owner == Some(to) {
            return;
        }
        if let Some(old_id) = old_owner {
            if let Some(old_state) = self.state_mut(old_id) {
                if let Some(pos) = old_state.territory.iter().position(|c| *c == coord) {
                    old_state.territory.remove(pos);
                }
                if old_state.capital == Some(coord) {
                    old_state.capital = None;
                }
            }
        }

        let cell = self.grid.cell_mut(coord);
        cell.owner = Some(to);
        cell.color = Some(color);
        cell.is_capital = false;

        if let Some(new_state) = self.state_mut(to) {
            new_state.territory.push(coord);
        }
    }

    /// Clear a cell back to unowned, dropping it from its owner's territory
    pub fn clear_cell(&mut self, coord: Coord) {
        if let Some(old_id) = self.grid.cell(coord).owner {
            if let Some(old_state) = self.state_mut(old_id) {
                if let Some(pos) = old_state.territory.iter().position(|c| *c == coord) {
                    old_state.territory.remove(pos);
                }
                if old_state.capital == Some(coord) {
                    old_state.capital = None;
                }
            }
        }
        let cell = self.grid.cell_mut(coord);
        cell.owner = None;
        cell.color = None;
        cell.is_capital = false;
    }

    /// Manual single-cell transfer with validation
    ///
    /// Invalid coordinates or an unknown target state are reported and the
    /// operation is skipped; the simulation continues.
    pub fn transfer_cell(&mut self, r: u32, q: u32, to: StateId) -> Result<()> {
        if !self.grid.in_bounds(r as i64, q as i64) {
            return Err(SimError::OutOfBounds(r, q));
        }
        if self.state(to).is_none() {
            return Err(SimError::StateNotFound(to));
        }
        let coord = Coord::new(r, q);
        if self.grid.cell(coord).is_capital {
            tracing::warn!(r, q, "transferred cell was a capital; capital reset");
        }
        self.move_cell(coord, to);
        Ok(())
    }
}
