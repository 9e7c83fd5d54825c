//! Offset hex grid storage and the two adjacency schemes
//!
//! Terrain contiguity and water labeling use 4-neighbor adjacency; every
//! political operation (borders, clusters, capture eligibility, coalition
//! contact) uses the parity-dependent 6-neighbor hex adjacency. The two are
//! never interchanged.

use serde::{Deserialize, Serialize};

use crate::core::error::{Result, SimError};
use crate::core::types::{Coord, StateId, Vec2};
use crate::map::cell::{Cell, Terrain};

const NEIGHBORS_4: [(i64, i64); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// Hex offsets for even rows
const HEX_EVEN: [(i64, i64); 6] = [(-1, -1), (-1, 0), (0, -1), (0, 1), (1, -1), (1, 0)];
/// Hex offsets for odd rows
const HEX_ODD: [(i64, i64); 6] = [(-1, 0), (-1, 1), (0, -1), (0, 1), (1, 0), (1, 1)];

/// Rectangular grid of hex cells in offset coordinates, row-major
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HexGrid {
    rows: u32,
    cols: u32,
    cells: Vec<Cell>,
}

impl HexGrid {
    /// Create a grid of the given size, all ocean
    pub fn new(rows: u32, cols: u32) -> Self {
        let mut cells = Vec::with_capacity((rows * cols) as usize);
        for r in 0..rows {
            for q in 0..cols {
                cells.push(Cell::new(Coord::new(r, q), Terrain::Ocean));
            }
        }
        Self { rows, cols, cells }
    }

    /// Rebuild a grid from a serialized cell vector
    pub fn from_cells(rows: u32, cols: u32, cells: Vec<Cell>) -> Result<Self> {
        if cells.len() != (rows as usize) * (cols as usize) {
            return Err(SimError::Snapshot(format!(
                "expected {} cells for a {}x{} grid, got {}",
                rows * cols,
                rows,
                cols,
                cells.len()
            )));
        }
        Ok(Self { rows, cols, cells })
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn cols(&self) -> u32 {
        self.cols
    }

    pub fn in_bounds(&self, r: i64, q: i64) -> bool {
        r >= 0 && r < self.rows as i64 && q >= 0 && q < self.cols as i64
    }

    fn index(&self, coord: Coord) -> usize {
        (coord.r * self.cols + coord.q) as usize
    }

    pub fn cell(&self, coord: Coord) -> &Cell {
        &self.cells[self.index(coord)]
    }

    pub fn cell_mut(&mut self, coord: Coord) -> &mut Cell {
        let idx = self.index(coord);
        &mut self.cells[idx]
    }

    pub fn get(&self, r: i64, q: i64) -> Option<&Cell> {
        if self.in_bounds(r, q) {
            Some(self.cell(Coord::new(r as u32, q as u32)))
        } else {
            None
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// All coordinates in row-major scan order
    pub fn coords(&self) -> impl Iterator<Item = Coord> + '_ {
        (0..self.rows).flat_map(move |r| (0..self.cols).map(move |q| Coord::new(r, q)))
    }

    pub fn into_cells(self) -> Vec<Cell> {
        self.cells
    }

    fn offsets_to_coords(&self, coord: Coord, offsets: &[(i64, i64)]) -> Vec<Coord> {
        let mut out = Vec::with_capacity(offsets.len());
        for (dr, dq) in offsets {
            let nr = coord.r as i64 + dr;
            let nq = coord.q as i64 + dq;
            if self.in_bounds(nr, nq) {
                out.push(Coord::new(nr as u32, nq as u32));
            }
        }
        out
    }

    /// 4-neighbor adjacency (up/down/left/right); terrain and water only
    pub fn neighbors4(&self, coord: Coord) -> Vec<Coord> {
        self.offsets_to_coords(coord, &NEIGHBORS_4)
    }

    /// 6-neighbor hex adjacency with row-parity offsets; all political operations
    pub fn hex_neighbors(&self, coord: Coord) -> Vec<Coord> {
        let offsets = if coord.r % 2 == 0 { &HEX_EVEN } else { &HEX_ODD };
        self.offsets_to_coords(coord, offsets)
    }

    /// Hex-to-Cartesian projection of a cell center
    pub fn position(&self, coord: Coord) -> Vec2 {
        let x = 3.0_f32.sqrt() * (coord.q as f32 + 0.5 * (coord.r % 2) as f32);
        let y = 1.5 * coord.r as f32;
        Vec2::new(x, y)
    }

    /// True if any hex neighbor lies outside `owner`'s territory
    pub fn is_border_cell(&self, coord: Coord, owner: StateId) -> bool {
        self.hex_neighbors(coord)
            .iter()
            .any(|n| self.cell(*n).owner != Some(owner))
    }

    /// True if any hex neighbor is a land cell owned by `owner`
    pub fn adjacent_to_owner(&self, coord: Coord, owner: StateId) -> bool {
        self.hex_neighbors(coord).iter().any(|n| {
            let cell = self.cell(*n);
            cell.is_land() && cell.owner == Some(owner)
        })
    }
}
