use crate::error::Result;
use crate::grid::{Cell, Grid, neighbors8_wrap};

/// Live cells among the eight toroidal neighbors of `(row, col)`.
/// The coordinate itself is bounds-checked like [`Grid::get`].
pub fn count_live_neighbors(grid: &Grid<Cell>, row: isize, col: isize) -> Result<u8> {
    grid.checked_idx(row, col)?;
    Ok(live_neighbors(grid, row as usize, col as usize))
}

/// Unchecked variant for callers that already iterate in-bounds coordinates.
#[inline]
pub fn live_neighbors(grid: &Grid<Cell>, row: usize, col: usize) -> u8 {
    let (w, h) = grid.dimensions();
    neighbors8_wrap(row, col, w, h)
        .filter(|&(r, c)| grid.at(r, c).is_alive())
        .count() as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LifeError;
    use proptest::prelude::*;

    fn grid_with(w: usize, h: usize, alive: &[(isize, isize)]) -> Grid {
        let mut g: Grid = Grid::new(w, h).unwrap();
        for &(r, c) in alive {
            g = g.with_cell(r, c, Cell::Alive).unwrap();
        }
        g
    }

    #[test]
    fn counts_surrounding_cells_only() {
        let block: Vec<(isize, isize)> = (1..=3)
            .flat_map(|r| (1..=3).map(move |c| (r, c)))
            .collect();
        let g = grid_with(5, 5, &block);
        assert_eq!(count_live_neighbors(&g, 2, 2), Ok(8));
        assert_eq!(count_live_neighbors(&g, 0, 0), Ok(1));
        assert_eq!(count_live_neighbors(&g, 0, 2), Ok(3));
    }

    #[test]
    fn row_above_zero_is_last_row() {
        let g = grid_with(60, 50, &[(49, 10)]);
        assert_eq!(count_live_neighbors(&g, 0, 10), Ok(1));
        assert_eq!(count_live_neighbors(&g, 0, 9), Ok(1));
        assert_eq!(count_live_neighbors(&g, 0, 11), Ok(1));
        assert_eq!(count_live_neighbors(&g, 1, 10), Ok(0));
    }

    #[test]
    fn wraps_on_all_four_edges() {
        let (w, h) = (7, 6);
        // left edge sees the right column
        let g = grid_with(w, h, &[(3, 6)]);
        assert_eq!(count_live_neighbors(&g, 3, 0), Ok(1));
        // right edge sees the left column
        let g = grid_with(w, h, &[(3, 0)]);
        assert_eq!(count_live_neighbors(&g, 3, 6), Ok(1));
        // bottom edge sees the top row
        let g = grid_with(w, h, &[(0, 3)]);
        assert_eq!(count_live_neighbors(&g, 5, 3), Ok(1));
        // top edge sees the bottom row
        let g = grid_with(w, h, &[(5, 3)]);
        assert_eq!(count_live_neighbors(&g, 0, 3), Ok(1));
    }

    #[test]
    fn corners_wrap_in_both_dimensions() {
        let (w, h) = (8, 5);
        let corners = [(0, 0), (0, 7), (4, 0), (4, 7)];
        let g = grid_with(w, h, &corners);
        for (r, c) in corners {
            // every other corner is a diagonal or orthogonal neighbor on the torus
            assert_eq!(count_live_neighbors(&g, r, c), Ok(3), "corner ({r}, {c})");
        }
    }

    #[test]
    fn rejects_out_of_bounds_coordinate() {
        let g = grid_with(4, 4, &[]);
        assert!(matches!(
            count_live_neighbors(&g, 4, 0),
            Err(LifeError::OutOfBounds { .. })
        ));
        assert!(count_live_neighbors(&g, 0, -1).is_err());
    }

    proptest! {
        #[test]
        fn test_cell_never_counts_itself(
            w in 3..20usize,
            h in 3..20usize,
            r in 0..20usize,
            c in 0..20usize,
        ) {
            let (r, c) = ((r % h) as isize, (c % w) as isize);
            let lone = grid_with(w, h, &[(r, c)]);
            prop_assert_eq!(count_live_neighbors(&lone, r, c), Ok(0));

            let mut full: Grid = Grid::new(w, h).unwrap();
            full = full.map_cells(|_, _, _| Cell::Alive);
            prop_assert_eq!(count_live_neighbors(&full, r, c), Ok(8));
        }
    }
}
