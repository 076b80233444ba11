use crate::grid::{Cell, Grid};

/// Number of live cells.
pub fn count_live_cells(grid: &Grid<Cell>) -> usize {
    grid.as_slice().iter().filter(|c| c.is_alive()).count()
}

/// Fraction of live cells, 0..=1.
pub fn density(grid: &Grid<Cell>) -> f64 {
    let (w, h) = grid.dimensions();
    count_live_cells(grid) as f64 / (w * h) as f64
}
