//! Coalition formation and collective battles
//!
//! Unions are rebuilt from scratch each pass: one greedy sweep in state
//! order, admitting neighbors that share a coalition with every member and
//! sit within the power margin of the members' average. A union battle is a
//! set of independent member-vs-enemy scoring contests whose victory points
//! first cover allied losses, then buy enemy coastal cells.

use ahash::AHashMap;

use crate::core::config::PoliticsConfig;
use crate::core::types::{Coord, StateId, UnionId};
use crate::polity::names;
use crate::polity::state::Union;
use crate::sim::battle;
use crate::sim::world::World;

/// Rebuild `world.unions` with one greedy formation pass
///
/// Returns the number of coalitions formed. Singletons are discarded and
/// their seed stays available to later coalitions in the same pass.
pub fn form_unions(world: &mut World, config: &PoliticsConfig) -> usize {
    let ids: Vec<StateId> = world
        .states
        .iter()
        .filter(|s| !s.is_separatist())
        .map(|s| s.id)
        .collect();

    let mut member_of: AHashMap<StateId, u32> = AHashMap::new();
    let mut unions: Vec<Union> = Vec::new();
    let mut next_id = 0u32;

    for &seed in &ids {
        if member_of.contains_key(&seed) {
            continue;
        }
        let mut members = vec![seed];
        member_of.insert(seed, next_id);

        for &candidate in &ids {
            if candidate == seed || member_of.contains_key(&candidate) {
                continue;
            }
            if admits(world, &members, candidate, config) {
                members.push(candidate);
                member_of.insert(candidate, next_id);
            }
        }

        if members.len() > 1 {
            let name = names::next_union_name(&unions, &mut world.rng);
            tracing::info!(union = %name, members = members.len(), "coalition formed");
            unions.push(Union {
                id: UnionId(next_id),
                name,
                members,
            });
            next_id += 1;
        } else {
            member_of.remove(&seed);
        }
    }

    let formed = unions.len();
    world.unions = unions;
    formed
}

/// Border with some member, shared coalition with every member, and power
/// within the margin of the members' average
fn admits(world: &World, members: &[StateId], candidate: StateId, config: &PoliticsConfig) -> bool {
    let Some(cand) = world.state(candidate) else {
        return false;
    };

    let border_ok = members
        .iter()
        .any(|m| world.states_border(*m, candidate));
    if !border_ok {
        return false;
    }

    let ideology_ok = members.iter().all(|m| {
        world
            .state(*m)
            .map_or(false, |s| s.zone.coalition() == cand.zone.coalition())
    });
    if !ideology_ok {
        return false;
    }

    let total: i64 = members
        .iter()
        .filter_map(|m| world.state(*m))
        .map(|s| s.power as i64)
        .sum();
    let average = total as f32 / members.len() as f32;
    (cand.power as f32 - average).abs() <= config.union_power_margin as f32
}

/// Per-member signed victory points from a union battle
#[derive(Debug, Clone)]
pub struct UnionBattleReport {
    pub union: UnionId,
    pub enemy: StateId,
    /// Positive is a win margin, negative a loss margin
    pub member_points: Vec<(StateId, i32)>,
    /// Cells losers ceded to the enemy
    pub ceded: usize,
    /// Cells winners captured from the enemy
    pub captured: usize,
}

/// Fight a whole union against one enemy state
///
/// Only members with land contact, or a coastal cell hex-adjacent to enemy
/// territory, participate; no participant means no battle.
pub fn union_battle(world: &mut World, union_id: UnionId, enemy: StateId) -> Option<UnionBattleReport> {
    let members = world
        .unions
        .iter()
        .find(|u| u.id == union_id)
        .map(|u| u.members.clone())?;
    world.state(enemy)?;

    let participants: Vec<StateId> = members
        .iter()
        .copied()
        .filter(|m| has_contact(world, *m, enemy))
        .collect();
    if participants.is_empty() {
        tracing::debug!(union = union_id.0, "no member reaches the enemy; no battle");
        return None;
    }

    let mut member_points: Vec<(StateId, i32)> = Vec::new();
    for member in &participants {
        let member_power = world.state(*member).map_or(1, |s| s.power);
        let enemy_power = world.state(enemy).map_or(1, |s| s.power);
        let (member_score, enemy_score) =
            battle::battle_rounds(&mut world.rng, member_power, enemy_power);
        member_points.push((*member, member_score as i32 - enemy_score as i32));
    }

    let mut remaining: Vec<(StateId, f64)> = member_points
        .iter()
        .filter(|(_, vp)| *vp > 0)
        .map(|(id, vp)| (*id, *vp as f64))
        .collect();
    let losers: Vec<(StateId, i32)> = member_points
        .iter()
        .filter(|(_, vp)| *vp < 0)
        .map(|(id, vp)| (*id, *vp))
        .collect();

    let mut ceded = 0;
    for (loser, vp) in &losers {
        let required = (-vp) as f64;
        if remaining.is_empty() {
            ceded += cede_coastal_cells(world, *loser, enemy, required as usize);
            continue;
        }
        // Each winner chips in the same share, capped by what it has left
        let share = required / remaining.len() as f64;
        let mut covered = 0.0;
        for (_, left) in remaining.iter_mut() {
            let contribution = left.min(share);
            *left -= contribution;
            covered += contribution;
        }
        if covered < required {
            let deficit = (required - covered) as usize;
            ceded += cede_coastal_cells(world, *loser, enemy, deficit);
        }
    }

    let mut captured = 0;
    for (winner, left) in &remaining {
        let quota = *left as usize;
        if quota > 0 {
            captured += capture_coastal_cells(world, *winner, enemy, quota);
        }
    }

    tracing::info!(
        union = union_id.0,
        enemy = %enemy,
        participants = participants.len(),
        ceded,
        captured,
        "union battle resolved"
    );

    Some(UnionBattleReport {
        union: union_id,
        enemy,
        member_points,
        ceded,
        captured,
    })
}

/// Land border, or a coastal cell of `member` hex-adjacent to enemy territory
fn has_contact(world: &World, member: StateId, enemy: StateId) -> bool {
    if world.states_border(member, enemy) {
        return true;
    }
    let Some(state) = world.state(member) else {
        return false;
    };
    state.territory.iter().any(|c| {
        world.grid.cell(*c).is_coastal
            && world
                .grid
                .hex_neighbors(*c)
                .iter()
                .any(|n| world.grid.cell(*n).owner == Some(enemy))
    })
}

/// A loser hands its own coastal land cells to the enemy, in storage order
fn cede_coastal_cells(world: &mut World, loser: StateId, enemy: StateId, count: usize) -> usize {
    transfer_coastal(world, loser, enemy, count)
}

/// A winner takes enemy coastal land cells, in storage order
fn capture_coastal_cells(world: &mut World, winner: StateId, enemy: StateId, count: usize) -> usize {
    transfer_coastal(world, enemy, winner, count)
}

fn transfer_coastal(world: &mut World, from: StateId, to: StateId, count: usize) -> usize {
    let Some(source) = world.state(from) else {
        return 0;
    };
    let cells: Vec<Coord> = source
        .territory
        .iter()
        .copied()
        .filter(|c| {
            let cell = world.grid.cell(*c);
            cell.is_land() && cell.is_coastal
        })
        .take(count)
        .collect();
    for coord in &cells {
        world.move_cell(*coord, to);
    }
    cells.len()
}
