//! Grid edits for discrete user intents.
//!
//! These are plain functions from one grid to the next. Whether an edit is
//! allowed right now (the simulation may be running) is decided by the caller,
//! see [`crate::session::Session`].

use log::debug;
use rand::Rng;

use crate::error::{LifeError, Result};
use crate::grid::{Cell, Grid};
use crate::patterns::{Pattern, PatternKind};

/// Flip one cell.
pub fn toggle_cell(grid: &Grid<Cell>, row: isize, col: isize) -> Result<Grid<Cell>> {
    let current = grid.get(row, col)?;
    grid.with_cell(row, col, current.flipped())
}

/// Set one cell alive.
pub fn set_alive(grid: &Grid<Cell>, row: isize, col: isize) -> Result<Grid<Cell>> {
    grid.with_cell(row, col, Cell::Alive)
}

/// Write `pattern` with its top-left cell at the anchor.
/// Cells landing outside the grid are dropped, never wrapped.
pub fn stamp_pattern(
    grid: &Grid<Cell>,
    pattern: &Pattern,
    anchor_row: isize,
    anchor_col: isize,
) -> Grid<Cell> {
    let (w, h) = grid.dimensions();
    let mut next = grid.clone();
    let mut clipped = 0usize;
    for (i, j, cell) in pattern.iter() {
        let target = anchor_row
            .checked_add(i as isize)
            .zip(anchor_col.checked_add(j as isize));
        match target {
            Some((r, c)) if r >= 0 && c >= 0 && (r as usize) < h && (c as usize) < w => {
                next.set(r as usize, c as usize, cell);
            }
            _ => clipped += 1,
        }
    }
    if clipped > 0 {
        debug!(
            "stamped {} at ({}, {}), {} cells clipped",
            pattern.name(),
            anchor_row,
            anchor_col,
            clipped
        );
    }
    next
}

/// Click dispatch: `Block` sets one cell (bounds-checked), other patterns are
/// stamped with their top-left at the coordinate.
pub fn place(grid: &Grid<Cell>, kind: PatternKind, row: isize, col: isize) -> Result<Grid<Cell>> {
    match kind {
        PatternKind::Block => set_alive(grid, row, col),
        other => {
            grid.checked_idx(row, col)?;
            Ok(stamp_pattern(grid, other.pattern(), row, col))
        }
    }
}

/// Check a probability lies in `[0, 1]`. NaN is rejected.
pub fn validate_probability(p: f64) -> Result<f64> {
    if (0.0..=1.0).contains(&p) {
        Ok(p)
    } else {
        Err(LifeError::InvalidParameter(format!(
            "alive probability must be within [0, 1], got {p}"
        )))
    }
}

/// Every cell independently alive with probability `alive_probability`.
/// 0 and 1 are exact: no draw can flip them.
pub fn randomize<R: Rng + ?Sized>(
    grid: &Grid<Cell>,
    alive_probability: f64,
    rng: &mut R,
) -> Result<Grid<Cell>> {
    let p = validate_probability(alive_probability)?;
    Ok(grid.map_cells(|_, _, _| Cell::from(rng.gen_bool(p))))
}

/// All-dead grid; same as [`Grid::new`].
pub fn clear(width: usize, height: usize) -> Result<Grid<Cell>> {
    Grid::new(width, height)
}
