//! Procedural continent generation
//!
//! Scatters continent centers with a minimum spacing, fills land by a
//! distance-decay threshold with a little jitter, then removes single-cell
//! islands and forces an ocean border so no continent touches a map edge.

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::core::config::MapConfig;
use crate::core::types::Coord;
use crate::map::cell::Terrain;
use crate::map::grid::HexGrid;
use crate::map::water;

/// Minimum spacing between continent centers
const CENTER_SPACING: f32 = 15.0;
/// Upper bound on placement attempts; dense configs settle for fewer centers
const MAX_PLACEMENT_ATTEMPTS: u32 = 10_000;
/// Distance-decay scale for the land threshold
const LAND_FALLOFF: f32 = 8.0;
const LAND_THRESHOLD: f32 = 0.5;

/// Generate a fully labeled world grid: terrain, water bodies, coastal flags
pub fn generate_map(config: &MapConfig, rng: &mut ChaCha8Rng) -> HexGrid {
    let mut grid = HexGrid::new(config.rows, config.cols);

    let centers = place_centers(config, rng);
    tracing::debug!("placed {} continent centers", centers.len());

    for r in 0..config.rows {
        for q in 0..config.cols {
            let min_dist = centers
                .iter()
                .map(|(cr, cq)| {
                    let dq = q as f32 - cq;
                    let dr = r as f32 - cr;
                    (dq * dq * 0.5 + dr * dr * 1.5).sqrt()
                })
                .fold(f32::INFINITY, f32::min);

            let jitter = (rng.gen::<f32>() - 0.5) * 0.1;
            let value = (-min_dist / LAND_FALLOFF).exp() + jitter;
            if value > LAND_THRESHOLD {
                grid.cell_mut(Coord::new(r, q)).terrain = Terrain::Land;
            }
        }
    }

    force_ocean_border(&mut grid);
    remove_single_cell_islands(&mut grid);

    water::label_water_bodies(&mut grid);
    water::mark_coastal_cells(&mut grid);
    grid
}

fn place_centers(config: &MapConfig, rng: &mut ChaCha8Rng) -> Vec<(f32, f32)> {
    let mut centers: Vec<(f32, f32)> = Vec::new();
    let mut attempts = 0;

    while centers.len() < config.continents as usize && attempts < MAX_PLACEMENT_ATTEMPTS {
        attempts += 1;
        let cq = rng.gen_range(5..config.cols.saturating_sub(5).max(6)) as f32;
        let cr = rng.gen_range(5..config.rows.saturating_sub(5).max(6)) as f32;
        let spaced = centers.iter().all(|(r, q)| {
            let dr = cr - r;
            let dq = cq - q;
            (dr * dr + dq * dq).sqrt() > CENTER_SPACING
        });
        if spaced {
            centers.push((cr, cq));
        }
    }

    centers
}

/// Land cells with no land 4-neighbor become ocean
fn remove_single_cell_islands(grid: &mut HexGrid) {
    let lonely: Vec<Coord> = grid
        .coords()
        .filter(|c| {
            grid.cell(*c).is_land()
                && grid
                    .neighbors4(*c)
                    .iter()
                    .all(|n| grid.cell(*n).is_ocean())
        })
        .collect();
    for coord in lonely {
        grid.cell_mut(coord).terrain = Terrain::Ocean;
    }
}

/// The outermost ring is always ocean
fn force_ocean_border(grid: &mut HexGrid) {
    let rows = grid.rows();
    let cols = grid.cols();
    let border: Vec<Coord> = grid
        .coords()
        .filter(|c| c.r == 0 || c.r == rows - 1 || c.q == 0 || c.q == cols - 1)
        .collect();
    for coord in border {
        grid.cell_mut(coord).terrain = Terrain::Ocean;
    }
}
