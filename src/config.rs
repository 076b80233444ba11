use serde::{Deserialize, Serialize};

use crate::editor::validate_probability;
use crate::error::{LifeError, Result};
use crate::grid::cell_count;
use crate::patterns::PatternKind;

/// Slowest and fastest accepted speeds, in generations per second.
pub const MIN_SPEED: u32 = 1;
pub const MAX_SPEED: u32 = 60;

/// Largest session grid accepted, in cells (2048 x 2048).
pub const MAX_CELLS: usize = 1 << 22;

/// Session parameters. Width and height are fixed for a session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Params {
    pub width: usize,
    pub height: usize,

    /// Generations per second while running.
    pub initial_speed: u32,

    /// Density used by "randomize".
    pub alive_probability: f64,

    /// What a click places.
    pub pattern: PatternKind,

    /// Seed for randomize; `None` draws from OS entropy.
    pub seed: Option<u64>,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            width: 60,
            height: 50,
            initial_speed: 5,
            alive_probability: 0.3,
            pattern: PatternKind::Block,
            seed: None,
        }
    }
}

impl Params {
    pub fn validate(&self) -> Result<()> {
        if cell_count(self.width, self.height)? > MAX_CELLS {
            return Err(LifeError::InvalidDimension {
                width: self.width,
                height: self.height,
            });
        }
        validate_speed(self.initial_speed)?;
        validate_probability(self.alive_probability)?;
        Ok(())
    }
}

pub fn validate_speed(speed: u32) -> Result<u32> {
    if (MIN_SPEED..=MAX_SPEED).contains(&speed) {
        Ok(speed)
    } else {
        Err(LifeError::InvalidParameter(format!(
            "speed must be within {MIN_SPEED}..={MAX_SPEED} generations per second, got {speed}"
        )))
    }
}
