//! Bilateral battle resolution
//!
//! A battle needs a war path: a shared hex border for a land war, or a
//! straight axis-aligned ocean corridor between two coastal cells for a
//! water war. Scoring is a round-by-round power-roll contest; the score gap
//! buys captured cells, enclaves first, nearest to the winner's capital
//! first. Two cascades can wipe the loser out entirely: a gap covering its
//! whole territory, or a capital left with no friendly neighbor.

use std::collections::VecDeque;

use ahash::AHashSet;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::core::types::{Coord, StateId};
use crate::map::grid::HexGrid;
use crate::polity::state::State;
use crate::sim::world::World;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarKind {
    Land,
    Water,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BattleOutcome {
    /// Equal scores; resolved, nothing changes hands
    Draw,
    Victory {
        winner: StateId,
        loser: StateId,
        captured: usize,
        /// Loser lost every cell, by margin or capital isolation
        annihilated: bool,
    },
}

#[derive(Debug, Clone)]
pub struct BattleReport {
    pub attacker: StateId,
    pub defender: StateId,
    pub kind: WarKind,
    pub attacker_score: u32,
    pub defender_score: u32,
    pub outcome: BattleOutcome,
}

/// Decide whether a war can happen and over which path
///
/// Land takes precedence; a straight sea lane only matters without a shared
/// border. `None` means no battle at all.
pub fn war_kind(world: &World, attacker: StateId, defender: StateId) -> Option<WarKind> {
    if world.states_border(attacker, defender) {
        return Some(WarKind::Land);
    }
    if has_straight_water_path(world, attacker, defender) {
        return Some(WarKind::Water);
    }
    None
}

/// Straight same-row or same-column corridor of ocean between two coastal
/// cells, one per side; bent or diagonal lanes do not qualify
fn has_straight_water_path(world: &World, a: StateId, b: StateId) -> bool {
    let (Some(sa), Some(sb)) = (world.state(a), world.state(b)) else {
        return false;
    };
    let coastal_a: Vec<Coord> = sa
        .territory
        .iter()
        .copied()
        .filter(|c| world.grid.cell(*c).is_coastal)
        .collect();
    let coastal_b: Vec<Coord> = sb
        .territory
        .iter()
        .copied()
        .filter(|c| world.grid.cell(*c).is_coastal)
        .collect();

    coastal_a
        .iter()
        .any(|ca| coastal_b.iter().any(|cb| straight_ocean_between(&world.grid, *ca, *cb)))
}

fn straight_ocean_between(grid: &HexGrid, a: Coord, b: Coord) -> bool {
    if a.r == b.r {
        let (lo, hi) = (a.q.min(b.q), a.q.max(b.q));
        (lo + 1..hi).all(|q| grid.cell(Coord::new(a.r, q)).is_ocean())
    } else if a.q == b.q {
        let (lo, hi) = (a.r.min(b.r), a.r.max(b.r));
        (lo + 1..hi).all(|r| grid.cell(Coord::new(r, a.q)).is_ocean())
    } else {
        false
    }
}

/// Roll a full battle: 15-25 rounds, one point per round to the higher roll
pub fn battle_rounds(rng: &mut ChaCha8Rng, attacker_power: i32, defender_power: i32) -> (u32, u32) {
    let rounds = rng.gen_range(15..=25);
    let a_power = attacker_power.max(1);
    let d_power = defender_power.max(1);
    let mut attacker_score = 0;
    let mut defender_score = 0;
    for _ in 0..rounds {
        let a_roll = rng.gen_range(1..=a_power);
        let d_roll = rng.gen_range(1..=d_power);
        if a_roll > d_roll {
            attacker_score += 1;
        } else if d_roll > a_roll {
            defender_score += 1;
        }
    }
    (attacker_score, defender_score)
}

/// Resolve one battle between two live states
///
/// `None` means no war path exists. Draws and empty capture sets still
/// resolve. Silent battles log at debug level only.
pub fn resolve_battle(
    world: &mut World,
    attacker: StateId,
    defender: StateId,
    silent: bool,
) -> Option<BattleReport> {
    let kind = war_kind(world, attacker, defender)?;

    let (attacker_power, attacker_name) = {
        let s = world.state(attacker)?;
        (s.power, s.name.clone())
    };
    let (defender_power, defender_name) = {
        let s = world.state(defender)?;
        (s.power, s.name.clone())
    };

    let (attacker_score, defender_score) =
        battle_rounds(&mut world.rng, attacker_power, defender_power);

    if !silent {
        tracing::info!(
            attacker = %attacker_name,
            defender = %defender_name,
            ?kind,
            score = format!("{attacker_score}:{defender_score}"),
            "battle"
        );
    } else {
        tracing::debug!(
            attacker = %attacker_name,
            defender = %defender_name,
            ?kind,
            score = format!("{attacker_score}:{defender_score}"),
            "battle"
        );
    }

    if attacker_score == defender_score {
        return Some(BattleReport {
            attacker,
            defender,
            kind,
            attacker_score,
            defender_score,
            outcome: BattleOutcome::Draw,
        });
    }

    let (winner, loser) = if attacker_score > defender_score {
        (attacker, defender)
    } else {
        (defender, attacker)
    };
    let diff = attacker_score.abs_diff(defender_score) as usize;

    let (captured, annihilated) = apply_victory(world, winner, loser, diff, kind, silent);

    Some(BattleReport {
        attacker,
        defender,
        kind,
        attacker_score,
        defender_score,
        outcome: BattleOutcome::Victory {
            winner,
            loser,
            captured,
            annihilated,
        },
    })
}

/// Apply a decided battle's territorial consequences
///
/// Split out from the scoring so tests can force a margin.
pub fn apply_victory(
    world: &mut World,
    winner: StateId,
    loser: StateId,
    diff: usize,
    kind: WarKind,
    silent: bool,
) -> (usize, bool) {
    let Some(loser_state) = world.state(loser) else {
        return (0, false);
    };
    let loser_size = loser_state.territory.len();
    let loser_name = loser_state.name.clone();

    // Cascade (a): the margin covers everything, capital included
    if diff >= loser_size {
        let territory = loser_state.territory.clone();
        for coord in territory {
            world.move_cell(coord, winner);
        }
        if !silent {
            tracing::info!(loser = %loser_name, "crushing defeat; state annihilated");
        }
        return (loser_size, true);
    }

    let plan = capture_plan(world, winner, loser, kind);
    let take = plan.len().min(diff);
    for coord in &plan[..take] {
        world.move_cell(*coord, winner);
    }

    // Cascade (b): a capital with no friendly neighbor collapses the rest
    let stranded_capital = world.state(loser).and_then(|s| s.capital).filter(|cap| {
        !world
            .grid
            .hex_neighbors(*cap)
            .iter()
            .any(|n| world.grid.cell(*n).owner == Some(loser))
    });
    if stranded_capital.is_some() {
        let remaining = world
            .state(loser)
            .map(|s| s.territory.clone())
            .unwrap_or_default();
        let extra = remaining.len();
        for coord in remaining {
            world.move_cell(coord, winner);
        }
        if !silent {
            tracing::info!(loser = %loser_name, "capital isolated; state collapses");
        }
        return (take + extra, true);
    }

    (take, false)
}

/// Ordered list of capturable loser cells
///
/// Water wars reach coastal cells only; the loser's capital is never a
/// candidate; a separatist winner only reaches cells touching its own
/// territory. Enclave cells go first, each group ordered by distance to the
/// winner's capital, or by row then column if it has none.
pub fn capture_plan(world: &World, winner: StateId, loser: StateId, kind: WarKind) -> Vec<Coord> {
    let (Some(winner_state), Some(loser_state)) = (world.state(winner), world.state(loser)) else {
        return Vec::new();
    };

    let candidates: Vec<Coord> = loser_state
        .territory
        .iter()
        .copied()
        .filter(|c| kind == WarKind::Land || world.grid.cell(*c).is_coastal)
        .filter(|c| Some(*c) != loser_state.capital)
        .filter(|c| {
            !winner_state.is_separatist() || world.grid.adjacent_to_owner(*c, winner)
        })
        .collect();
    if candidates.is_empty() {
        return Vec::new();
    }

    let enclaves = enclave_cells(&world.grid, loser_state);
    let (mut first, mut rest): (Vec<Coord>, Vec<Coord>) = candidates
        .into_iter()
        .partition(|c| enclaves.contains(c));

    match winner_state.capital {
        Some(cap) => {
            first.sort_by(|a, b| a.offset_distance(&cap).total_cmp(&b.offset_distance(&cap)));
            rest.sort_by(|a, b| a.offset_distance(&cap).total_cmp(&b.offset_distance(&cap)));
        }
        None => {
            first.sort_by_key(|c| (c.r, c.q));
            rest.sort_by_key(|c| (c.r, c.q));
        }
    }

    first.extend(rest);
    first
}

/// Cells unreachable from the owner's capital through its own territory;
/// everything, if it has no capital
pub fn enclave_cells(grid: &HexGrid, state: &State) -> AHashSet<Coord> {
    let Some(capital) = state.capital else {
        return state.territory.iter().copied().collect();
    };

    let mut reached: AHashSet<Coord> = AHashSet::new();
    let mut queue = VecDeque::new();
    reached.insert(capital);
    queue.push_back(capital);
    while let Some(coord) = queue.pop_front() {
        for n in grid.hex_neighbors(coord) {
            if grid.cell(n).owner == Some(state.id) && reached.insert(n) {
                queue.push_back(n);
            }
        }
    }

    state
        .territory
        .iter()
        .copied()
        .filter(|c| !reached.contains(c))
        .collect()
}
