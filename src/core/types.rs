//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};

/// Unique identifier for political states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StateId(pub u32);

impl StateId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for StateId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for unions (coalitions of states)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UnionId(pub u32);

/// Identifier for a connected body of water
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WaterBodyId(pub u32);

/// Simulation tick counter
pub type Tick = u64;

/// Offset hex-grid coordinates (row, column)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub r: u32,
    pub q: u32,
}

impl Coord {
    pub fn new(r: u32, q: u32) -> Self {
        Self { r, q }
    }

    /// Euclidean distance in raw offset coordinates
    pub fn offset_distance(&self, other: &Self) -> f32 {
        let dr = self.r as f32 - other.r as f32;
        let dq = self.q as f32 - other.q as f32;
        (dr * dr + dq * dq).sqrt()
    }
}

/// 2D position in projected map space
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: &Self) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}
