//! Initial territory assignment and capital selection
//!
//! Seeds are scattered on random land cells and grown by a multi-source
//! flood fill over 4-neighbor land adjacency, so partitions follow growth
//! order rather than true nearest-seed regions. Land unreachable from every
//! seed is attached to the state with the nearest centroid afterwards.

use std::collections::VecDeque;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::core::types::{Coord, StateId, Vec2};
use crate::map::grid::HexGrid;
use crate::polity::ideology::Ideology;
use crate::polity::names;
use crate::polity::state::State;
use crate::sim::world::World;

/// Seed `count` states on land and flood-fill the whole landmass
pub fn generate_states(world: &mut World, count: u32) {
    let mut land: Vec<Coord> = world
        .grid
        .coords()
        .filter(|c| world.grid.cell(*c).is_land())
        .collect();
    land.shuffle(&mut world.rng);
    let seeds: Vec<Coord> = land.into_iter().take(count as usize).collect();

    let mut pool = names::shuffled_state_names(&mut world.rng);
    let mut colors = names::shuffled_colors(&mut world.rng);

    for &seed in &seeds {
        let id = world.registry.allocate();
        let name = pool
            .pop()
            .map(str::to_string)
            .unwrap_or_else(|| names::generated_name(&mut world.rng));
        let color = colors
            .pop()
            .map(str::to_string)
            .unwrap_or_else(|| names::random_hex_color(&mut world.rng));
        let power = world.rng.gen_range(80..=120);
        let ideology = Ideology::random(&mut world.rng);

        world
            .states
            .push(State::new(id, name, color, power, ideology));
        world.move_cell(seed, id);
    }

    flood_fill_territories(world, &seeds);
    assign_orphans(world);

    let ids = world.live_ids();
    for id in ids {
        assign_capital(world, id);
    }
}

/// Grow every seed's territory simultaneously; cells go to whichever
/// frontier touches them first
fn flood_fill_territories(world: &mut World, seeds: &[Coord]) {
    let mut queue: VecDeque<Coord> = seeds.iter().copied().collect();

    while let Some(coord) = queue.pop_front() {
        let Some(owner) = world.grid.cell(coord).owner else {
            continue;
        };
        for n in world.grid.neighbors4(coord) {
            let cell = world.grid.cell(n);
            if cell.is_land() && cell.owner.is_none() {
                world.move_cell(n, owner);
                queue.push_back(n);
            }
        }
    }
}

/// Attach land cut off from every seed to the state with the nearest centroid
fn assign_orphans(world: &mut World) {
    let orphans: Vec<Coord> = world
        .grid
        .coords()
        .filter(|c| world.grid.cell(*c).is_land() && world.grid.cell(*c).owner.is_none())
        .collect();

    for coord in orphans {
        let position = world.grid.position(coord);
        let nearest = world
            .states
            .iter()
            .filter(|s| !s.territory.is_empty())
            .min_by(|a, b| {
                let da = territory_centroid(&world.grid, &a.territory).distance(&position);
                let db = territory_centroid(&world.grid, &b.territory).distance(&position);
                da.total_cmp(&db)
            })
            .map(|s| s.id);
        if let Some(id) = nearest {
            world.move_cell(coord, id);
        }
    }
}

/// Centroid of a territory in projected coordinates
pub fn territory_centroid(grid: &HexGrid, territory: &[Coord]) -> Vec2 {
    let mut x = 0.0;
    let mut y = 0.0;
    for coord in territory {
        let p = grid.position(*coord);
        x += p.x;
        y += p.y;
    }
    let n = territory.len().max(1) as f32;
    Vec2::new(x / n, y / n)
}

/// Pick the centroid-nearest cell of a territory, preferring interior cells
///
/// Interior cells have no hex neighbor outside the territory. Distance ties
/// resolve to the first minimal candidate in scan order; nothing depends on
/// which one wins.
pub fn capital_candidate(grid: &HexGrid, owner: StateId, territory: &[Coord]) -> Option<Coord> {
    if territory.is_empty() {
        return None;
    }
    let centroid = territory_centroid(grid, territory);

    let interior: Vec<Coord> = territory
        .iter()
        .copied()
        .filter(|c| !grid.is_border_cell(*c, owner))
        .collect();
    let candidates: &[Coord] = if interior.is_empty() {
        territory
    } else {
        &interior
    };

    candidates
        .iter()
        .copied()
        .min_by(|a, b| {
            let da = grid.position(*a).distance(&centroid);
            let db = grid.position(*b).distance(&centroid);
            da.total_cmp(&db)
        })
}

/// Select and mark a state's capital, replacing any previous one
pub fn assign_capital(world: &mut World, id: StateId) {
    let Some(state) = world.state(id) else {
        return;
    };
    let previous = state.capital;
    let candidate = capital_candidate(&world.grid, id, &state.territory);

    if let Some(old) = previous {
        world.grid.cell_mut(old).is_capital = false;
    }
    if let Some(cap) = candidate {
        world.grid.cell_mut(cap).is_capital = true;
    }
    if let Some(state) = world.state_mut(id) {
        state.capital = candidate;
    }
}
