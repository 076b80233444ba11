use rayon::prelude::*;

use crate::grid::{Cell, Grid};

const DEAD: [u8; 4] = [0, 0, 0, 255];
const ALIVE: [u8; 4] = [255, 255, 255, 255];

/// Image size in pixels for a grid drawn at `cell_px` pixels per cell.
pub fn image_size(grid: &Grid<Cell>, cell_px: usize) -> (usize, usize) {
    let (w, h) = grid.dimensions();
    (w * cell_px, h * cell_px)
}

/// RGBA buffer, each cell a `cell_px` square: dead black, alive white.
pub fn render_grid(grid: &Grid<Cell>, cell_px: usize) -> Vec<u8> {
    let cell_px = cell_px.max(1);
    let (img_w, img_h) = image_size(grid, cell_px);
    let mut rgba = vec![0u8; img_w * img_h * 4];

    rgba.par_chunks_mut(img_w * 4)
        .enumerate()
        .for_each(|(py, row)| {
            let r = py / cell_px;
            for px in 0..img_w {
                let color = if grid.at(r, px / cell_px).is_alive() { ALIVE } else { DEAD };
                row[px * 4..px * 4 + 4].copy_from_slice(&color);
            }
        });

    rgba
}
