//! Enclave absorption
//!
//! A full-grid sweep over hex-connected ownership components. Small
//! components cut off from their owner's capital are handed wholesale to the
//! strongest hex-adjacent foreign state. Changes are collected during the
//! scan and applied afterwards, so one pass never feeds itself.

use std::collections::VecDeque;

use crate::core::types::{Coord, StateId};
use crate::sim::world::World;

/// Absorb every candidate component of size at most `threshold`
///
/// Returns the number of components moved. Running it again immediately
/// changes nothing: every absorbed component merges into territory that
/// could reach its owner's capital or grows past the threshold check only
/// through combat.
pub fn absorb_enclaves(world: &mut World, threshold: usize) -> usize {
    let rows = world.grid.rows() as usize;
    let cols = world.grid.cols() as usize;
    let mut visited = vec![false; rows * cols];
    let index = |c: Coord| (c.r as usize) * cols + c.q as usize;

    let mut changes: Vec<(Vec<Coord>, StateId)> = Vec::new();

    for start in world.grid.coords().collect::<Vec<_>>() {
        if visited[index(start)] {
            continue;
        }
        let Some(owner) = world.grid.cell(start).owner else {
            continue;
        };

        // Hex-connected component of same-owner cells
        let mut component = Vec::new();
        let mut queue = VecDeque::from([start]);
        visited[index(start)] = true;
        while let Some(coord) = queue.pop_front() {
            component.push(coord);
            for n in world.grid.hex_neighbors(coord) {
                if !visited[index(n)] && world.grid.cell(n).owner == Some(owner) {
                    visited[index(n)] = true;
                    queue.push_back(n);
                }
            }
        }

        let Some(owner_state) = world.state(owner) else {
            continue;
        };
        if let Some(cap) = owner_state.capital {
            if component.contains(&cap) {
                continue;
            }
        }
        if component.len() > threshold {
            continue;
        }

        // Foreign neighbors in first-seen order; the strongest takes the lot
        let mut neighbors: Vec<StateId> = Vec::new();
        for coord in &component {
            for n in world.grid.hex_neighbors(*coord) {
                if let Some(other) = world.grid.cell(n).owner {
                    if other != owner && world.state(other).is_some() && !neighbors.contains(&other)
                    {
                        neighbors.push(other);
                    }
                }
            }
        }
        let Some(target) = neighbors
            .into_iter()
            .max_by_key(|id| world.state(*id).map_or(i32::MIN, |s| s.power))
        else {
            continue;
        };

        changes.push((component, target));
    }

    let moved = changes.len();
    for (component, target) in changes {
        tracing::debug!(
            cells = component.len(),
            target = %target,
            "absorbing stray component"
        );
        for coord in component {
            world.move_cell(coord, target);
        }
    }
    moved
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::cell::Terrain;
    use crate::map::grid::HexGrid;
    use crate::polity::ideology::Ideology;
    use crate::polity::state::State;

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
            "#bcf60c".to_string(),
            power,
            Ideology::new(1, 1),
        ));
        for (r, q) in cells {
            world.move_cell(Coord::new(*r, *q), id);
        }
        id
    }

    fn set_capital(world: &mut World, id: StateId, coord: Coord) {
        world.state_mut(id).unwrap().capital = Some(coord);
        world.grid.cell_mut(coord).is_capital = true;
    }

    /// Owner with a capital block far away plus a two-cell fragment wedged
    /// between two potential absorbers
    fn enclave_world() -> (World, StateId, StateId, StateId) {
        let mut world = land_world(10, 10);
        let owner = add_state(&mut world, &[(0, 0), (0, 1), (1, 0), (5, 5), (5, 6)], 100);
        set_capital(&mut world, owner, Coord::new(0, 0));
        let weak = add_state(&mut world, &[(4, 4), (4, 5), (4, 6)], 50);
        set_capital(&mut world, weak, Coord::new(4, 4));
        let strong = add_state(&mut world, &[(6, 4), (6, 5), (6, 6)], 120);
        set_capital(&mut world, strong, Coord::new(6, 4));
        (world, owner, weak, strong)
    }

    #[test]
    fn test_fragment_goes_to_strongest_neighbor() {
        let (mut world, owner, weak, strong) = enclave_world();
        let moved = absorb_enclaves(&mut world, 3);
        assert_eq!(moved, 1);
        assert_eq!(world.grid.cell(Coord::new(5, 5)).owner, Some(strong));
        assert_eq!(world.grid.cell(Coord::new(5, 6)).owner, Some(strong));
        assert_eq!(world.state(owner).unwrap().territory.len(), 3);
        assert_eq!(world.state(weak).unwrap().territory.len(), 3);
    }

    #[test]
    fn test_capital_component_is_never_absorbed() {
        let (mut world, owner, _, strong) = enclave_world();
        // Make the capital block itself tiny and surrounded
        let moved = absorb_enclaves(&mut world, 3);
        assert_eq!(moved, 1);
        // Capital block of three cells stays
        assert_eq!(world.grid.cell(Coord::new(0, 0)).owner, Some(owner));
        let _ = strong;
    }

    #[test]
    fn test_component_above_threshold_stays() {
        let (mut world, owner, _, _) = enclave_world();
        let moved = absorb_enclaves(&mut world, 1);
        assert_eq!(moved, 0);
        assert_eq!(world.state(owner).unwrap().territory.len(), 5);
    }

    #[test]
    fn test_fragment_with_no_neighbors_stays() {
        let mut world = land_world(10, 10);
        let owner = add_state(&mut world, &[(0, 0), (0, 1), (8, 8)], 100);
        set_capital(&mut world, owner, Coord::new(0, 0));
        let moved = absorb_enclaves(&mut world, 3);
        assert_eq!(moved, 0);
        assert_eq!(world.grid.cell(Coord::new(8, 8)).owner, Some(owner));
    }

    #[test]
    fn test_absorption_is_a_fixed_point() {
        let (mut world, ..) = enclave_world();
        absorb_enclaves(&mut world, 3);
        let ownership: Vec<Option<StateId>> =
            world.grid.iter().map(|c| c.owner).collect();
        let moved = absorb_enclaves(&mut world, 3);
        assert_eq!(moved, 0);
        let after: Vec<Option<StateId>> = world.grid.iter().map(|c| c.owner).collect();
        assert_eq!(ownership, after);
    }
}
