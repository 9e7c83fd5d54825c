//! Grid cell and terrain model

use serde::{Deserialize, Serialize};

use crate::core::types::{Coord, StateId, WaterBodyId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Terrain {
    Land,
    Ocean,
}

/// One cell of the world grid
///
/// An owned cell appears in exactly one state's territory vector, and a
/// capital cell is always a member of its owner's territory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cell {
    pub coord: Coord,
    pub terrain: Terrain,
    /// Owning state, if any
    pub owner: Option<StateId>,
    /// Render color mirrored from the owning state
    pub color: Option<String>,
    /// Water body this ocean cell belongs to
    pub water_body: Option<WaterBodyId>,
    /// True for water bodies touching a map edge
    pub is_oceanic: bool,
    /// True for land cells with at least one 4-neighbor of ocean
    pub is_coastal: bool,
    /// Water bodies this coastal cell touches
    pub coastal_waters: Vec<WaterBodyId>,
    pub is_capital: bool,
}

impl Cell {
    pub fn new(coord: Coord, terrain: Terrain) -> Self {
        Self {
            coord,
            terrain,
            owner: None,
            color: None,
            water_body: None,
            is_oceanic: false,
            is_coastal: false,
            coastal_waters: Vec::new(),
            is_capital: false,
        }
    }

    pub fn is_land(&self) -> bool {
        self.terrain == Terrain::Land
    }

    pub fn is_ocean(&self) -> bool {
        self.terrain == Terrain::Ocean
    }
}
