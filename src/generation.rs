use rayon::prelude::*;

use crate::grid::{Cell, Grid};
use crate::neighbors::live_neighbors;

/// Conway's B3/S23 rule: survive on 2 or 3, birth on exactly 3.
#[inline]
pub fn next_state(cell: Cell, live_neighbors: u8) -> Cell {
    match (cell, live_neighbors) {
        (Cell::Alive, 2 | 3) => Cell::Alive,
        (Cell::Dead, 3) => Cell::Alive,
        _ => Cell::Dead,
    }
}

/// Compute the next generation.
/// Rows are evaluated in parallel, each reading only `grid` and writing its
/// own row of a fresh buffer, so every count sees the current generation.
pub fn next_generation(grid: &Grid<Cell>) -> Grid<Cell> {
    let (w, h) = grid.dimensions();
    let mut next = vec![Cell::Dead; w * h];

    next.par_chunks_mut(w).enumerate().for_each(|(row, out)| {
        for col in 0..w {
            out[col] = next_state(grid.at(row, col), live_neighbors(grid, row, col));
        }
    });

    Grid::from_raw(next, w, h)
}

/// Apply [`next_generation`] `generations` times.
pub fn advance(grid: &Grid<Cell>, generations: usize) -> Grid<Cell> {
    let mut current = grid.clone();
    for _ in 0..generations {
        current = next_generation(&current);
    }
    current
}
