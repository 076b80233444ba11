use std::path::PathBuf;
use std::process::ExitCode;

use lifegrid::config::Params;
use lifegrid::render;
use log::{error, info};

const CELL_PX: usize = 10;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().collect();

    let defaults = Params::default();
    let seed: u64 = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(42);
    let width: usize = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(defaults.width);
    let height: usize = args.get(3).and_then(|s| s.parse().ok()).unwrap_or(defaults.height);
    let generations: usize = args.get(4).and_then(|s| s.parse().ok()).unwrap_or(100);
    let out_dir: PathBuf = args
        .get(5)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("artifacts"));

    let params = Params {
        width,
        height,
        ..defaults
    };

    info!(
        "Simulating {}x{} grid with seed={}, density={}, generations={}",
        width, height, seed, params.alive_probability, generations
    );

    let (run, timings) = match lifegrid::simulate(seed, generations, &params) {
        Ok(result) => result,
        Err(e) => {
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    info!("Timings:");
    for t in &timings {
        info!("  {:20} {:8.1} ms", t.name, t.ms);
    }
    info!(
        "Live cells: {} -> {} after {} generations",
        run.population.first().copied().unwrap_or(0),
        run.population.last().copied().unwrap_or(0),
        run.generations
    );

    if let Err(e) = std::fs::create_dir_all(&out_dir) {
        error!("failed to create {}: {e}", out_dir.display());
        return ExitCode::FAILURE;
    }

    let frames = [("initial.png", &run.initial), ("final.png", &run.last)];
    for (name, grid) in frames {
        let path = out_dir.join(name);
        let (w, h) = render::image_size(grid, CELL_PX);
        let rgba = render::render_grid(grid, CELL_PX);
        let saved = image::save_buffer(&path, &rgba, w as u32, h as u32, image::ColorType::Rgba8);
        if let Err(e) = saved {
            error!("failed to save {}: {e}", path.display());
            return ExitCode::FAILURE;
        }
        info!("Saved {}", path.display());
    }

    info!("Done.");
    ExitCode::SUCCESS
}
