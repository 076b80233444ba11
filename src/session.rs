//! Driver-side state: the one current grid plus run/pause state and speed.
//!
//! The session owns its grid and swaps it wholesale on every transition.
//! Edits are only honored while paused; while running they do nothing and
//! report `false`.

use std::time::Duration;

use log::{debug, info};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;

use crate::config::{Params, validate_speed};
use crate::editor;
use crate::error::Result;
use crate::generation::next_generation;
use crate::grid::{Cell, Grid};
use crate::metrics::count_live_cells;
use crate::patterns::{Pattern, PatternKind};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub enum RunState {
    #[default]
    Paused,
    Running,
}

pub struct Session {
    grid: Grid<Cell>,
    state: RunState,
    generation: u64,
    speed: u32,
    alive_probability: f64,
    pattern: PatternKind,
    rng: StdRng,
}

impl Session {
    pub fn new(params: &Params) -> Result<Self> {
        params.validate()?;
        let rng = match params.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ok(Self {
            grid: Grid::new(params.width, params.height)?,
            state: RunState::Paused,
            generation: 0,
            speed: params.initial_speed,
            alive_probability: params.alive_probability,
            pattern: params.pattern,
            rng,
        })
    }

    pub fn grid(&self) -> &Grid<Cell> {
        &self.grid
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == RunState::Running
    }

    /// Generations since the last clear or randomize.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn speed(&self) -> u32 {
        self.speed
    }

    pub fn pattern(&self) -> PatternKind {
        self.pattern
    }

    pub fn live_cells(&self) -> usize {
        count_live_cells(&self.grid)
    }

    /// PAUSED -> RUNNING. Returns whether the state changed.
    pub fn start(&mut self) -> bool {
        self.transition(RunState::Running)
    }

    /// RUNNING -> PAUSED. Returns whether the state changed.
    pub fn stop(&mut self) -> bool {
        self.transition(RunState::Paused)
    }

    pub fn pause(&mut self) -> bool {
        self.stop()
    }

    pub fn toggle_run(&mut self) -> RunState {
        match self.state {
            RunState::Paused => self.start(),
            RunState::Running => self.stop(),
        };
        self.state
    }

    fn transition(&mut self, to: RunState) -> bool {
        if self.state == to {
            return false;
        }
        info!("{:?} -> {:?} at generation {}", self.state, to, self.generation);
        self.state = to;
        true
    }

    pub fn set_speed(&mut self, speed: u32) -> Result<()> {
        self.speed = validate_speed(speed)?;
        debug!("speed set to {} gen/s", self.speed);
        Ok(())
    }

    /// Delay between ticks at the current speed.
    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs(1) / self.speed
    }

    pub fn set_pattern(&mut self, pattern: PatternKind) {
        self.pattern = pattern;
    }

    /// Timer-driven advance; only moves while running.
    pub fn tick(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        self.advance();
        true
    }

    /// Manual single step; only while paused.
    pub fn step(&mut self) -> bool {
        if self.is_running() {
            return false;
        }
        self.advance();
        true
    }

    fn advance(&mut self) {
        self.grid = next_generation(&self.grid);
        self.generation += 1;
    }

    /// Replace the grid with the result of `edit` unless running.
    fn edit<F>(&mut self, edit: F) -> Result<bool>
    where
        F: FnOnce(&Grid<Cell>, &mut StdRng) -> Result<Grid<Cell>>,
    {
        if self.is_running() {
            debug!("edit ignored while running");
            return Ok(false);
        }
        self.grid = edit(&self.grid, &mut self.rng)?;
        Ok(true)
    }

    pub fn toggle(&mut self, row: isize, col: isize) -> Result<bool> {
        self.edit(|g, _| editor::toggle_cell(g, row, col))
    }

    pub fn set_alive(&mut self, row: isize, col: isize) -> Result<bool> {
        self.edit(|g, _| editor::set_alive(g, row, col))
    }

    /// Place the selected pattern (or `kind`, if given) at a clicked cell.
    pub fn place(&mut self, row: isize, col: isize, kind: Option<PatternKind>) -> Result<bool> {
        let kind = kind.unwrap_or(self.pattern);
        self.edit(|g, _| editor::place(g, kind, row, col))
    }

    pub fn stamp(&mut self, pattern: &Pattern, row: isize, col: isize) -> Result<bool> {
        self.edit(|g, _| Ok(editor::stamp_pattern(g, pattern, row, col)))
    }

    /// Randomize with `probability`, or the session default.
    pub fn randomize(&mut self, probability: Option<f64>) -> Result<bool> {
        let p = probability.unwrap_or(self.alive_probability);
        let changed = self.edit(|g, rng| editor::randomize(g, p, rng))?;
        if changed {
            self.generation = 0;
        }
        Ok(changed)
    }

    /// Stop and reset to an all-dead grid. Always honored.
    pub fn clear(&mut self) -> Result<()> {
        self.stop();
        let (w, h) = self.grid.dimensions();
        self.grid = editor::clear(w, h)?;
        self.generation = 0;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LifeError;
    use crate::patterns::GLIDER;

    fn paused() -> Session {
        Session::new(&Params {
            width: 20,
            height: 15,
            seed: Some(3),
            ..Params::default()
        })
        .unwrap()
    }

    #[test]
    fn starts_paused_and_empty() {
        let s = paused();
        assert_eq!(s.state(), RunState::Paused);
        assert_eq!(s.live_cells(), 0);
        assert_eq!(s.grid().dimensions(), (20, 15));
    }

    #[test]
    fn start_stop_transitions() {
        let mut s = paused();
        assert!(s.start());
        assert!(!s.start());
        assert!(s.is_running());
        assert!(s.pause());
        assert!(!s.stop());
        assert_eq!(s.toggle_run(), RunState::Running);
        assert_eq!(s.toggle_run(), RunState::Paused);
    }

    #[test]
    fn edits_are_noops_while_running() {
        let mut s = paused();
        s.start();
        let before = s.grid().clone();
        assert_eq!(s.toggle(1, 1), Ok(false));
        assert_eq!(s.set_alive(2, 2), Ok(false));
        assert_eq!(s.place(3, 3, Some(PatternKind::Glider)), Ok(false));
        assert_eq!(s.stamp(&GLIDER, 0, 0), Ok(false));
        assert_eq!(s.randomize(Some(1.0)), Ok(false));
        // out-of-bounds is ignored too, nothing is attempted
        assert_eq!(s.toggle(-1, 0), Ok(false));
        assert_eq!(s.grid(), &before);
    }

    #[test]
    fn edits_apply_while_paused() {
        let mut s = paused();
        assert_eq!(s.toggle(1, 1), Ok(true));
        assert_eq!(s.place(5, 5, Some(PatternKind::Glider)), Ok(true));
        assert_eq!(s.live_cells(), 6);
        assert!(matches!(s.toggle(15, 0), Err(LifeError::OutOfBounds { .. })));
        assert_eq!(s.live_cells(), 6);
    }

    #[test]
    fn stamp_far_off_grid_changes_nothing() {
        let mut s = paused();
        assert_eq!(s.stamp(&GLIDER, isize::MAX, isize::MAX), Ok(true));
        assert_eq!(s.live_cells(), 0);
    }

    #[test]
    fn oversized_session_is_rejected() {
        let huge = Params { width: 100_000, height: 100_000, ..Params::default() };
        assert!(matches!(
            Session::new(&huge),
            Err(LifeError::InvalidDimension { .. })
        ));
    }

    #[test]
    fn place_uses_selected_pattern() {
        let mut s = paused();
        s.place(0, 0, None).unwrap();
        assert_eq!(s.live_cells(), 1);
        s.set_pattern(PatternKind::Glider);
        s.place(5, 5, None).unwrap();
        assert_eq!(s.live_cells(), 6);
    }

    #[test]
    fn clear_forces_pause_and_resets() {
        let mut s = paused();
        s.randomize(Some(0.5)).unwrap();
        s.start();
        s.tick();
        s.clear().unwrap();
        assert_eq!(s.state(), RunState::Paused);
        assert_eq!(s.live_cells(), 0);
        assert_eq!(s.generation(), 0);
    }

    #[test]
    fn tick_only_while_running_step_only_while_paused() {
        let mut s = paused();
        s.stamp(&GLIDER, 0, 0).unwrap();
        assert!(!s.tick());
        assert!(s.step());
        assert_eq!(s.generation(), 1);
        s.start();
        assert!(!s.step());
        assert!(s.tick());
        assert_eq!(s.generation(), 2);
        assert_eq!(s.live_cells(), 5);
    }

    #[test]
    fn speed_is_validated() {
        let mut s = paused();
        assert!(s.set_speed(0).is_err());
        assert!(s.set_speed(61).is_err());
        assert_eq!(s.speed(), 5);
        s.set_speed(10).unwrap();
        assert_eq!(s.tick_interval(), Duration::from_millis(100));
    }

    #[test]
    fn seeded_sessions_randomize_identically() {
        let mut a = paused();
        let mut b = paused();
        a.randomize(None).unwrap();
        b.randomize(None).unwrap();
        assert_eq!(a.grid(), b.grid());
        assert!(a.live_cells() > 0);
    }

    #[test]
    fn rejects_invalid_params() {
        let bad = Params { alive_probability: -1.0, ..Params::default() };
        assert!(Session::new(&bad).is_err());
    }
}
