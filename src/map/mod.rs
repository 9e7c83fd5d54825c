//! World grid: cell storage, dual adjacency, water labeling, generation

pub mod cell;
pub mod generator;
pub mod grid;
pub mod water;

pub use cell::{Cell, Terrain};
pub use grid::HexGrid;
