use serde::{Deserialize, Serialize};

use crate::error::{LifeError, Result};

/// State of a single cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Cell {
    #[default]
    Dead = 0,
    Alive = 1,
}

impl Cell {
    #[inline]
    pub fn is_alive(self) -> bool {
        self == Cell::Alive
    }

    #[inline]
    pub fn flipped(self) -> Cell {
        match self {
            Cell::Alive => Cell::Dead,
            Cell::Dead => Cell::Alive,
        }
    }
}

impl From<bool> for Cell {
    fn from(alive: bool) -> Self {
        if alive { Cell::Alive } else { Cell::Dead }
    }
}

/// Row-major flat grid with fixed dimensions.
/// Addressed as (row, col); every edit returns a new value.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Grid<T = Cell> {
    data: Vec<T>,
    w: usize,
    h: usize,
}

/// Cell count for `width x height`, rejecting zero sides and overflow.
pub fn cell_count(width: usize, height: usize) -> Result<usize> {
    match width.checked_mul(height) {
        Some(n) if n > 0 => Ok(n),
        _ => Err(LifeError::InvalidDimension { width, height }),
    }
}

impl<T: Copy + Default> Grid<T> {
    pub fn new(width: usize, height: usize) -> Result<Self> {
        let n = cell_count(width, height)?;
        Ok(Self {
            data: vec![T::default(); n],
            w: width,
            h: height,
        })
    }

    /// Build a grid from nested rows. Rows must be non-empty and equally long.
    pub fn from_rows<R: AsRef<[T]>>(rows: &[R]) -> Result<Self> {
        let h = rows.len();
        let w = rows.first().map_or(0, |r| r.as_ref().len());
        let mut data = Vec::with_capacity(cell_count(w, h)?);
        for row in rows {
            let row = row.as_ref();
            if row.len() != w {
                return Err(LifeError::InvalidDimension {
                    width: row.len(),
                    height: h,
                });
            }
            data.extend_from_slice(row);
        }
        Ok(Self { data, w, h })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.w
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.h
    }

    /// `(width, height)`.
    #[inline]
    pub fn dimensions(&self) -> (usize, usize) {
        (self.w, self.h)
    }

    #[inline]
    pub fn idx(&self, row: usize, col: usize) -> usize {
        debug_assert!(row < self.h && col < self.w);
        row * self.w + col
    }

    /// Validate a signed coordinate and return its flat index.
    pub fn checked_idx(&self, row: isize, col: isize) -> Result<usize> {
        if row < 0 || col < 0 || row as usize >= self.h || col as usize >= self.w {
            return Err(LifeError::OutOfBounds {
                row,
                col,
                width: self.w,
                height: self.h,
            });
        }
        Ok(self.idx(row as usize, col as usize))
    }

    /// Unchecked read for in-bounds coordinates.
    #[inline]
    pub fn at(&self, row: usize, col: usize) -> T {
        self.data[self.idx(row, col)]
    }

    pub fn get(&self, row: isize, col: isize) -> Result<T> {
        let i = self.checked_idx(row, col)?;
        Ok(self.data[i])
    }

    /// Copy of `self` with one cell replaced.
    pub fn with_cell(&self, row: isize, col: isize, v: T) -> Result<Self> {
        let i = self.checked_idx(row, col)?;
        let mut next = self.clone();
        next.data[i] = v;
        Ok(next)
    }

    /// In-place write, for building a fresh value before it is handed out.
    #[inline]
    pub(crate) fn set(&mut self, row: usize, col: usize, v: T) {
        let i = self.idx(row, col);
        self.data[i] = v;
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn rows(&self) -> impl Iterator<Item = &[T]> {
        self.data.chunks(self.w)
    }

    /// Every cell with its `(row, col)`, row-major.
    pub fn iter_cells(&self) -> impl Iterator<Item = (usize, usize, T)> + '_ {
        let w = self.w;
        self.data
            .iter()
            .enumerate()
            .map(move |(i, &v)| (i / w, i % w, v))
    }

    /// Same-sized grid with each cell produced by `f(row, col, old)`.
    pub fn map_cells<F>(&self, mut f: F) -> Self
    where
        F: FnMut(usize, usize, T) -> T,
    {
        let w = self.w;
        let data = self
            .data
            .iter()
            .enumerate()
            .map(|(i, &v)| f(i / w, i % w, v))
            .collect();
        Self {
            data,
            w: self.w,
            h: self.h,
        }
    }

    /// Take ownership of a buffer already laid out for `width x height`.
    pub(crate) fn from_raw(data: Vec<T>, width: usize, height: usize) -> Self {
        debug_assert_eq!(data.len(), width * height);
        Self {
            data,
            w: width,
            h: height,
        }
    }
}

/// Wrap a coordinate onto the torus. Opposite edges are adjacent.
#[inline]
pub fn wrap(row: isize, col: isize, w: usize, h: usize) -> (usize, usize) {
    let wr = row.rem_euclid(h as isize) as usize;
    let wc = col.rem_euclid(w as isize) as usize;
    (wr, wc)
}

/// Relative offsets of the eight Moore neighbors, as (row, col).
#[rustfmt::skip]
pub const MOORE_OFFSETS: [(isize, isize); 8] = [
    (-1, -1), (-1, 0), (-1, 1),
    (0, -1),           (0, 1),
    (1, -1),  (1, 0),  (1, 1),
];

/// 8-connected neighbors with toroidal wrapping in both dimensions.
pub fn neighbors8_wrap(
    row: usize,
    col: usize,
    w: usize,
    h: usize,
) -> impl Iterator<Item = (usize, usize)> {
    MOORE_OFFSETS
        .into_iter()
        .map(move |(dr, dc)| wrap(row as isize + dr, col as isize + dc, w, h))
}
