//! Political state and union records

use serde::{Deserialize, Serialize};

use crate::core::types::{Coord, StateId, Tick, UnionId};
use crate::polity::ideology::{Ideology, IdeologyZone};

/// Transitional separatist metadata, present only while a breakaway state is
/// counting down to independence or suppression
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Separatism {
    /// State this one broke away from; the parent may die first
    pub parent: StateId,
    /// Ticks remaining until resolution
    pub timer: i32,
    /// Tick the secession happened
    pub since: Tick,
}

/// One history record per state per tick, append-only
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TickRecord {
    pub tick: Tick,
    pub id: StateId,
    pub name: String,
    pub power: i32,
    pub ideology_x: i32,
    pub ideology_y: i32,
    pub zone: IdeologyZone,
    pub stability: i32,
}

/// A political state
///
/// Territory storage order is meaningful: union battles cede and capture
/// coastal cells in this order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct State {
    pub id: StateId,
    pub name: String,
    /// Render color, mirrored onto owned cells
    pub color: String,
    pub territory: Vec<Coord>,
    pub capital: Option<Coord>,
    pub power: i32,
    /// Bounded to [-10, 10]
    pub stability: i32,
    pub ideology: Ideology,
    /// Zone derived from the ideology coordinates, refreshed on drift
    pub zone: IdeologyZone,
    pub separatist: Option<Separatism>,
    pub history: Vec<TickRecord>,
}

impl State {
    pub fn new(id: StateId, name: String, color: String, power: i32, ideology: Ideology) -> Self {
        Self {
            id,
            name,
            color,
            territory: Vec::new(),
            capital: None,
            power,
            stability: 5,
            ideology,
            zone: ideology.zone(),
            separatist: None,
            history: Vec::new(),
        }
    }

    pub fn is_separatist(&self) -> bool {
        self.separatist.is_some()
    }

    /// Parent id while transitional
    pub fn parent(&self) -> Option<StateId> {
        self.separatist.map(|s| s.parent)
    }

    /// Append this tick's history record from current fields
    pub fn record_tick(&mut self, tick: Tick) {
        self.history.push(TickRecord {
            tick,
            id: self.id,
            name: self.name.clone(),
            power: self.power,
            ideology_x: self.ideology.x,
            ideology_y: self.ideology.y,
            zone: self.zone,
            stability: self.stability,
        });
    }
}

/// An ephemeral coalition of states; recomputed per formation pass
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Union {
    pub id: UnionId,
    pub name: String,
    pub members: Vec<StateId>,
}
