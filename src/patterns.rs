use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::LifeError;
use crate::grid::Cell;

/// A fixed rectangular stamp, stored row-major.
/// Only built from the constants below, so `cells` always fills the rectangle.
#[derive(Debug, PartialEq, Eq)]
pub struct Pattern {
    name: &'static str,
    width: usize,
    height: usize,
    cells: &'static [u8],
}

impl Pattern {
    /// Evaluated at compile time for the constants; a shape mismatch fails the build.
    const fn new(name: &'static str, width: usize, height: usize, cells: &'static [u8]) -> Self {
        assert!(cells.len() == width * height, "pattern cells must fill width x height");
        Self {
            name,
            width,
            height,
            cells,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// `(width, height)`.
    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    #[inline]
    pub fn cell(&self, row: usize, col: usize) -> Cell {
        Cell::from(self.cells[row * self.width + col] != 0)
    }

    /// `(row, col, state)` for every cell of the stamp.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, Cell)> + '_ {
        (0..self.height).flat_map(move |r| (0..self.width).map(move |c| (r, c, self.cell(r, c))))
    }
}

pub const BLOCK: Pattern = Pattern::new("Block", 1, 1, &[1]);

#[rustfmt::skip]
pub const GLIDER: Pattern = Pattern::new(
    "Glider",
    3,
    3,
    &[
        0, 1, 0,
        0, 0, 1,
        1, 1, 1,
    ],
);

/// What a click places on the grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PatternKind {
    /// A single live cell.
    #[default]
    Block,
    Glider,
}

impl PatternKind {
    pub fn pattern(self) -> &'static Pattern {
        match self {
            PatternKind::Block => &BLOCK,
            PatternKind::Glider => &GLIDER,
        }
    }
}

impl FromStr for PatternKind {
    type Err = LifeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "block" => Ok(PatternKind::Block),
            "glider" => Ok(PatternKind::Glider),
            _ => Err(LifeError::InvalidParameter(format!("unknown pattern {s:?}"))),
        }
    }
}

impl fmt::Display for PatternKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.pattern().name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn glider_shape() {
        let alive: Vec<_> = GLIDER
            .iter()
            .filter(|(_, _, c)| c.is_alive())
            .map(|(r, c, _)| (r, c))
            .collect();
        assert_eq!(alive, vec![(0, 1), (1, 2), (2, 0), (2, 1), (2, 2)]);
        assert_eq!(GLIDER.dimensions(), (3, 3));
        assert_eq!(BLOCK.iter().count(), 1);
    }

    #[test]
    fn parse_pattern_names() {
        assert_eq!("Glider".parse::<PatternKind>(), Ok(PatternKind::Glider));
        assert_eq!("block".parse::<PatternKind>(), Ok(PatternKind::Block));
        assert!(matches!(
            "pulsar".parse::<PatternKind>(),
            Err(LifeError::InvalidParameter(_))
        ));
        assert_eq!(PatternKind::Glider.to_string(), "Glider");
    }
}
