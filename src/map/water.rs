//! Water-body labeling and coastal marking
//!
//! Both passes use 4-neighbor adjacency only.

use std::collections::VecDeque;

use crate::core::types::{Coord, WaterBodyId};
use crate::map::grid::HexGrid;

/// Group ocean cells into connected water bodies and mark bodies touching a
/// map edge as oceanic
pub fn label_water_bodies(grid: &mut HexGrid) {
    let mut next_id = 0u32;
    let coords: Vec<Coord> = grid.coords().collect();

    for start in coords {
        if !grid.cell(start).is_ocean() || grid.cell(start).water_body.is_some() {
            continue;
        }

        let id = WaterBodyId(next_id);
        next_id += 1;

        let mut body = Vec::new();
        let mut queue = VecDeque::new();
        grid.cell_mut(start).water_body = Some(id);
        queue.push_back(start);

        while let Some(coord) = queue.pop_front() {
            body.push(coord);
            for n in grid.neighbors4(coord) {
                let cell = grid.cell(n);
                if cell.is_ocean() && cell.water_body.is_none() {
                    grid.cell_mut(n).water_body = Some(id);
                    queue.push_back(n);
                }
            }
        }

        let rows = grid.rows();
        let cols = grid.cols();
        let is_oceanic = body
            .iter()
            .any(|c| c.r == 0 || c.r == rows - 1 || c.q == 0 || c.q == cols - 1);
        for coord in body {
            grid.cell_mut(coord).is_oceanic = is_oceanic;
        }
    }
}

/// Mark land cells with an ocean 4-neighbor as coastal and record the water
/// bodies they touch
pub fn mark_coastal_cells(grid: &mut HexGrid) {
    let coords: Vec<Coord> = grid.coords().collect();

    for coord in coords {
        if !grid.cell(coord).is_land() {
            continue;
        }

        let mut touched: Vec<WaterBodyId> = grid
            .neighbors4(coord)
            .iter()
            .filter_map(|n| {
                let cell = grid.cell(*n);
                if cell.is_ocean() {
                    cell.water_body
                } else {
                    None
                }
            })
            .collect();
        touched.sort();
        touched.dedup();

        let cell = grid.cell_mut(coord);
        cell.is_coastal = !touched.is_empty();
        cell.coastal_waters = touched;
    }
}
