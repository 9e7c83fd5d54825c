//! Separatism: breakaway clusters and their resolution
//!
//! An unstable state may shed a five-cell border cluster into a new
//! separatist state. Separatists count down for five ticks, then either win
//! independence (enough territory survived) or are suppressed. Carving the
//! cluster out can leave the parent's capital with no friendly neighbor; in
//! that case the whole parent defects and the parent dies on the spot.

use std::collections::VecDeque;

use ahash::AHashSet;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::core::config::PoliticsConfig;
use crate::core::types::{Coord, StateId, Tick};
use crate::polity::ideology::{Ideology, IdeologyZone};
use crate::polity::names;
use crate::polity::state::{Separatism, State};
use crate::sim::assignment;
use crate::sim::world::World;

/// How a separatist left the transitional role
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeparatismOutcome {
    /// Kept enough territory; now a regular state under a new name
    Independence(StateId),
    /// Folded back into the parent
    Suppressed { state: StateId, parent: StateId },
    /// Parent died first; the territory is dropped to unowned land
    TerritoryDiscarded { state: StateId, cells: usize },
}

/// Roll the separatism trigger for every live unstable state
///
/// Returns the states created this tick.
pub fn trigger_stage(world: &mut World, config: &PoliticsConfig) -> Vec<StateId> {
    let mut created = Vec::new();
    let ids = world.live_ids();
    for id in ids {
        let unstable = world.state(id).map_or(false, |s| s.stability < 0);
        if !unstable {
            continue;
        }
        if world.rng.gen::<f32>() >= config.separatism_chance {
            continue;
        }
        if let Some(new_id) = trigger_separatism(world, id, config) {
            created.push(new_id);
        }
    }
    created
}

/// Attempt to split a border cluster off `parent`
///
/// No border cells, or a cluster that cannot reach the exact target size,
/// is a complete no-op: no state is created and the parent keeps every cell.
pub fn trigger_separatism(
    world: &mut World,
    parent: StateId,
    config: &PoliticsConfig,
) -> Option<StateId> {
    let tick = world.tick;
    let (territory, capital, parent_zone, parent_name) = {
        let state = world.state(parent)?;
        (
            state.territory.clone(),
            state.capital,
            state.zone,
            state.name.clone(),
        )
    };

    let border: Vec<Coord> = territory
        .iter()
        .copied()
        .filter(|c| world.grid.is_border_cell(*c, parent) && Some(*c) != capital)
        .collect();
    let start = *border.choose(&mut world.rng)?;

    let cluster = grow_cluster(world, start, parent, capital, config.cluster_size);
    if cluster.len() < config.cluster_size {
        return None;
    }
    let cluster_set: AHashSet<Coord> = cluster.iter().copied().collect();

    // Would removing the cluster strand the capital?
    let encircled = match capital {
        Some(cap) => !world.grid.hex_neighbors(cap).iter().any(|n| {
            world.grid.cell(*n).owner == Some(parent) && !cluster_set.contains(n)
        }),
        None => false,
    };

    let new_id = spawn_separatist(world, parent, parent_zone, tick, config);

    if encircled {
        tracing::info!(
            parent = %parent_name,
            "capital encircled; remaining territory defects with the separatists"
        );
        for coord in territory {
            world.move_cell(coord, new_id);
        }
        world.remove_state(parent);
    } else {
        for coord in cluster {
            world.move_cell(coord, new_id);
        }
    }

    let name = world.state(new_id).map(|s| s.name.clone()).unwrap_or_default();
    tracing::info!(separatist = %name, parent = %parent_name, "secession");
    Some(new_id)
}

/// Hex BFS confined to the parent's territory, excluding the capital, up to
/// `size` cells
fn grow_cluster(
    world: &World,
    start: Coord,
    parent: StateId,
    capital: Option<Coord>,
    size: usize,
) -> Vec<Coord> {
    let mut cluster = Vec::new();
    let mut visited: AHashSet<Coord> = AHashSet::new();
    let mut queue = VecDeque::new();
    visited.insert(start);
    queue.push_back(start);

    while let Some(coord) = queue.pop_front() {
        if world.grid.cell(coord).owner == Some(parent) && Some(coord) != capital {
            cluster.push(coord);
        }
        if cluster.len() >= size {
            break;
        }
        for n in world.grid.hex_neighbors(coord) {
            if world.grid.cell(n).owner == Some(parent)
                && Some(n) != capital
                && !visited.contains(&n)
            {
                visited.insert(n);
                queue.push_back(n);
            }
        }
    }
    cluster
}

/// Create the separatist state record; territory is transferred by the caller
fn spawn_separatist(
    world: &mut World,
    parent: StateId,
    parent_zone: IdeologyZone,
    tick: Tick,
    config: &PoliticsConfig,
) -> StateId {
    let power = world.average_power().round() as i32;

    // Resample away from the parent's zone, giving up after ten tries
    let mut ideology = Ideology::random(&mut world.rng);
    let mut attempts = 0;
    while ideology.zone() == parent_zone && attempts < 10 {
        ideology = Ideology::random(&mut world.rng);
        attempts += 1;
    }

    let name = names::unused_state_name(&world.states, &mut world.rng);
    let color = names::unused_color(&world.states, &mut world.rng);
    let id = world.registry.allocate();

    let mut state = State::new(id, name, color, power, ideology);
    state.separatist = Some(Separatism {
        parent,
        timer: config.separatist_timer,
        since: tick,
    });
    world.states.push(state);
    id
}

/// Count down every live separatist and resolve the expired ones
pub fn resolve_stage(world: &mut World, config: &PoliticsConfig) -> Vec<SeparatismOutcome> {
    let mut outcomes = Vec::new();
    let mut to_remove = Vec::new();

    let ids = world.separatist_ids();
    for id in ids {
        let expired = {
            let Some(state) = world.state_mut(id) else {
                continue;
            };
            let Some(sep) = state.separatist.as_mut() else {
                continue;
            };
            sep.timer -= 1;
            sep.timer <= 0
        };
        if !expired {
            continue;
        }

        let Some((size, parent_id)) = world
            .state(id)
            .and_then(|s| s.parent().map(|p| (s.territory.len(), p)))
        else {
            continue;
        };

        if size >= config.independence_threshold {
            grant_independence(world, id);
            outcomes.push(SeparatismOutcome::Independence(id));
        } else {
            let outcome = suppress(world, id, parent_id);
            outcomes.push(outcome);
            to_remove.push(id);
        }
    }

    for id in to_remove {
        world.remove_state(id);
    }
    outcomes
}

fn grant_independence(world: &mut World, id: StateId) {
    let name = names::unused_state_name(&world.states, &mut world.rng);
    let color = names::random_color(&mut world.rng);

    let territory = {
        let Some(state) = world.state_mut(id) else {
            return;
        };
        state.separatist = None;
        state.stability = 5;
        state.name = name.clone();
        state.color = color.clone();
        state.territory.clone()
    };
    for coord in territory {
        world.grid.cell_mut(coord).color = Some(color.clone());
    }
    assignment::assign_capital(world, id);

    tracing::info!(state = %name, "separatists won independence");
}

fn suppress(world: &mut World, id: StateId, parent_id: StateId) -> SeparatismOutcome {
    let (name, territory) = {
        let Some(state) = world.state(id) else {
            return SeparatismOutcome::TerritoryDiscarded { state: id, cells: 0 };
        };
        (state.name.clone(), state.territory.clone())
    };

    if world.state(parent_id).is_some() {
        for coord in territory {
            world.move_cell(coord, parent_id);
        }
        tracing::info!(separatist = %name, parent = %parent_id, "separatism suppressed");
        SeparatismOutcome::Suppressed {
            state: id,
            parent: parent_id,
        }
    } else {
        let cells = territory.len();
        for coord in territory {
            world.clear_cell(coord);
        }
        tracing::warn!(
            separatist = %name,
            cells,
            "suppressed with no surviving parent; territory discarded"
        );
        SeparatismOutcome::TerritoryDiscarded { state: id, cells }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::cell::Terrain;
    use crate::map::grid::HexGrid;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn land_world(rows: u32, cols: u32) -> World {
        let mut grid = HexGrid::new(rows, cols);
        for r in 0..rows {
            for q in 0..cols {
                grid.cell_mut(Coord::new(r, q)).terrain = Terrain::Land;
            }
        }
        World::new(grid, 42)
    }

    fn add_state(world: &mut World, cells: &[(u32, u32)], power: i32) -> StateId {
        let id = world.registry.allocate();
        world.states.push(State::new(
            id,
            format!("State {}", id.0),
            "#4363d8".to_string(),
            power,
            Ideology::new(1, 1),
        ));
        for (r, q) in cells {
            world.move_cell(Coord::new(*r, *q), id);
        }
        id
    }

    fn config() -> PoliticsConfig {
        PoliticsConfig::default()
    }

    #[test]
    fn test_undersized_cluster_is_a_noop() {
        // Four cells total; the cluster can never reach five
        let mut world = land_world(6, 6);
        let id = add_state(&mut world, &[(0, 0), (0, 1), (1, 0), (1, 1)], 100);
        assignment::assign_capital(&mut world, id);

        let result = trigger_separatism(&mut world, id, &config());
        assert!(result.is_none());
        assert_eq!(world.states.len(), 1);
        assert_eq!(world.state(id).unwrap().territory.len(), 4);
    }

    #[test]
    fn test_trigger_carves_exact_cluster() {
        let mut world = land_world(8, 8);
        let cells: Vec<(u32, u32)> = (0..4).flat_map(|r| (0..4).map(move |q| (r, q))).collect();
        let id = add_state(&mut world, &cells, 100);
        assignment::assign_capital(&mut world, id);

        let new_id = trigger_separatism(&mut world, id, &config()).expect("secession");
        let separatist = world.state(new_id).unwrap();
        assert!(separatist.is_separatist());
        assert_eq!(separatist.territory.len(), 5);
        assert_eq!(separatist.parent(), Some(id));
        assert_eq!(separatist.stability, 5);
        assert!(separatist.capital.is_none());
        assert_eq!(world.state(id).unwrap().territory.len(), 11);

        // Cluster is hex-connected
        let territory: AHashSet<Coord> = separatist.territory.iter().copied().collect();
        let mut reached = AHashSet::new();
        let mut queue = VecDeque::from([separatist.territory[0]]);
        reached.insert(separatist.territory[0]);
        while let Some(c) = queue.pop_front() {
            for n in world.grid.hex_neighbors(c) {
                if territory.contains(&n) && reached.insert(n) {
                    queue.push_back(n);
                }
            }
        }
        assert_eq!(reached.len(), 5);
    }

    #[test]
    fn test_cluster_never_contains_capital() {
        let mut world = land_world(8, 8);
        let cells: Vec<(u32, u32)> = (0..4).flat_map(|r| (0..4).map(move |q| (r, q))).collect();
        let id = add_state(&mut world, &cells, 100);
        assignment::assign_capital(&mut world, id);
        let capital = world.state(id).unwrap().capital.unwrap();

        for seed in 0..20u64 {
            let mut trial = land_world(8, 8);
            trial.rng = ChaCha8Rng::seed_from_u64(seed);
            let tid = add_state(&mut trial, &cells, 100);
            assignment::assign_capital(&mut trial, tid);
            if let Some(new_id) = trigger_separatism(&mut trial, tid, &config()) {
                let separatist = trial.state(new_id).unwrap();
                assert!(!separatist.territory.contains(&capital));
            }
        }
    }

    #[test]
    fn test_encirclement_destroys_parent() {
        // 3x3 block with the capital pinned to the corner (2,2): its only
        // friendly hex neighbors are (2,3) and (3,2), so a five-cell cluster
        // containing both strands it
        let cells: Vec<(u32, u32)> = (2..5).flat_map(|r| (2..5).map(move |q| (r, q))).collect();

        let mut encircled_seen = false;
        for seed in 0..40u64 {
            let mut trial = land_world(8, 8);
            trial.rng = ChaCha8Rng::seed_from_u64(seed);
            let tid = add_state(&mut trial, &cells, 100);
            trial.state_mut(tid).unwrap().capital = Some(Coord::new(2, 2));
            trial.grid.cell_mut(Coord::new(2, 2)).is_capital = true;

            if let Some(new_id) = trigger_separatism(&mut trial, tid, &config()) {
                if trial.state(tid).is_none() {
                    // Parent destroyed: the child holds all nine cells and
                    // the capital flag is gone
                    encircled_seen = true;
                    let child = trial.state(new_id).unwrap();
                    assert_eq!(child.territory.len(), 9);
                    assert!(!trial.grid.cell(Coord::new(2, 2)).is_capital);
                    assert_eq!(trial.grid.cell(Coord::new(2, 2)).owner, Some(new_id));
                } else {
                    assert_eq!(trial.state(tid).unwrap().territory.len(), 4);
                }
            }
        }
        assert!(encircled_seen, "no trial produced an encirclement");
    }

    #[test]
    fn test_resolution_grants_independence() {
        let mut world = land_world(8, 8);
        let parent_cells: Vec<(u32, u32)> =
            (0..4).flat_map(|r| (0..4).map(move |q| (r, q))).collect();
        let parent = add_state(&mut world, &parent_cells, 100);
        assignment::assign_capital(&mut world, parent);

        let sep_cells: Vec<(u32, u32)> = (6..8).flat_map(|r| (0..3).map(move |q| (r, q))).collect();
        let sep = add_state(&mut world, &sep_cells, 100);
        let old_name = world.state(sep).unwrap().name.clone();
        world.state_mut(sep).unwrap().separatist = Some(Separatism {
            parent,
            timer: 1,
            since: 0,
        });

        let outcomes = resolve_stage(&mut world, &config());
        assert_eq!(outcomes, vec![SeparatismOutcome::Independence(sep)]);

        let state = world.state(sep).unwrap();
        assert!(!state.is_separatist());
        assert_eq!(state.stability, 5);
        assert_ne!(state.name, old_name);
        let cap = state.capital.expect("independent state needs a capital");
        assert!(state.territory.contains(&cap));
        assert!(world.grid.cell(cap).is_capital);
    }

    #[test]
    fn test_resolution_suppresses_small_separatist() {
        let mut world = land_world(8, 8);
        let parent_cells: Vec<(u32, u32)> =
            (0..4).flat_map(|r| (0..4).map(move |q| (r, q))).collect();
        let parent = add_state(&mut world, &parent_cells, 100);
        assignment::assign_capital(&mut world, parent);

        let sep = add_state(&mut world, &[(6, 0), (6, 1), (7, 0)], 100);
        world.state_mut(sep).unwrap().separatist = Some(Separatism {
            parent,
            timer: 1,
            since: 0,
        });

        let outcomes = resolve_stage(&mut world, &config());
        assert_eq!(
            outcomes,
            vec![SeparatismOutcome::Suppressed {
                state: sep,
                parent
            }]
        );
        assert!(world.state(sep).is_none());
        assert_eq!(world.state(parent).unwrap().territory.len(), 19);
        assert_eq!(world.grid.cell(Coord::new(6, 0)).owner, Some(parent));
    }

    #[test]
    fn test_suppression_with_dead_parent_discards_territory() {
        let mut world = land_world(8, 8);
        let sep = add_state(&mut world, &[(6, 0), (6, 1), (7, 0)], 100);
        world.state_mut(sep).unwrap().separatist = Some(Separatism {
            parent: StateId(77),
            timer: 1,
            since: 0,
        });

        let outcomes = resolve_stage(&mut world, &config());
        assert_eq!(
            outcomes,
            vec![SeparatismOutcome::TerritoryDiscarded {
                state: sep,
                cells: 3
            }]
        );
        assert!(world.state(sep).is_none());
        assert!(world.grid.cell(Coord::new(6, 0)).owner.is_none());
        assert!(world.grid.cell(Coord::new(6, 1)).owner.is_none());
    }

    #[test]
    fn test_timer_counts_down_once_per_stage() {
        let mut world = land_world(8, 8);
        let parent = add_state(&mut world, &[(0, 0)], 100);
        let sep_cells: Vec<(u32, u32)> = (5..7).flat_map(|r| (0..3).map(move |q| (r, q))).collect();
        let sep = add_state(&mut world, &sep_cells, 100);
        world.state_mut(sep).unwrap().separatist = Some(Separatism {
            parent,
            timer: 3,
            since: 0,
        });

        assert!(resolve_stage(&mut world, &config()).is_empty());
        assert!(resolve_stage(&mut world, &config()).is_empty());
        let outcomes = resolve_stage(&mut world, &config());
        assert_eq!(outcomes, vec![SeparatismOutcome::Independence(sep)]);
    }
}
