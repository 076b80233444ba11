pub mod config;
pub mod editor;
pub mod error;
pub mod generation;
pub mod grid;
pub mod metrics;
pub mod neighbors;
pub mod patterns;
pub mod render;
pub mod session;

use std::time::Instant;

use log::debug;
use rand::SeedableRng;
use rand::rngs::StdRng;

pub use config::Params;
pub use error::{LifeError, Result};
pub use grid::{Cell, Grid};
pub use session::{RunState, Session};

/// A finished headless run: the seeded grid and where it ended up.
pub struct Run {
    pub initial: Grid<Cell>,
    pub last: Grid<Cell>,
    pub generations: usize,
    /// Live cells after each generation, starting with the seeded grid.
    pub population: Vec<usize>,
}

pub struct Timing {
    pub name: &'static str,
    pub ms: f64,
}

/// Seed a randomized grid and advance it `generations` times.
pub fn simulate(seed: u64, generations: usize, params: &Params) -> Result<(Run, Vec<Timing>)> {
    params.validate()?;
    let mut timings = Vec::new();
    let total_start = Instant::now();

    // 1. Random seed grid
    let t = Instant::now();
    let mut rng = StdRng::seed_from_u64(seed);
    let empty = Grid::new(params.width, params.height)?;
    let initial = editor::randomize(&empty, params.alive_probability, &mut rng)?;
    timings.push(Timing {
        name: "randomize",
        ms: t.elapsed().as_secs_f64() * 1000.0,
    });

    // 2. Advance, tracking population
    let t = Instant::now();
    let mut population = Vec::with_capacity(generations + 1);
    population.push(metrics::count_live_cells(&initial));
    let mut last = initial.clone();
    for g in 0..generations {
        last = generation::next_generation(&last);
        let live = metrics::count_live_cells(&last);
        debug!("generation {}: {} live", g + 1, live);
        population.push(live);
    }
    timings.push(Timing {
        name: "generations",
        ms: t.elapsed().as_secs_f64() * 1000.0,
    });

    timings.push(Timing {
        name: "TOTAL",
        ms: total_start.elapsed().as_secs_f64() * 1000.0,
    });

    let run = Run {
        initial,
        last,
        generations,
        population,
    };

    Ok((run, timings))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simulate_is_deterministic_per_seed() {
        let params = Params { width: 32, height: 24, ..Params::default() };
        let (a, timings) = simulate(9, 10, &params).unwrap();
        let (b, _) = simulate(9, 10, &params).unwrap();
        assert_eq!(a.last, b.last);
        assert_eq!(a.population, b.population);
        assert_eq!(a.population.len(), 11);
        assert_eq!(a.population[10], metrics::count_live_cells(&a.last));
        assert_eq!(a.last, generation::advance(&a.initial, 10));
        assert_eq!(timings.last().map(|t| t.name), Some("TOTAL"));
    }

    #[test]
    fn simulate_rejects_bad_params() {
        let params = Params { width: 0, ..Params::default() };
        assert!(matches!(
            simulate(1, 1, &params),
            Err(LifeError::InvalidDimension { .. })
        ));
    }
}
