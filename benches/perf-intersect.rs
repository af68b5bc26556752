#[path = "utils/random.rs"]
mod random;

#[path = "utils/scene.rs"]
mod scene;
use scene::*;

use std::path::Path;

use anyhow::Context;
use car_crossings::{EngineConfig, IntersectionEngine, UniformGrid};
use rand::{rngs::StdRng, SeedableRng};

/// Optional YAML file overriding the default engine configuration.
const CONFIG_VAR: &str = "CAR_CROSSINGS_CONFIG";

fn load_config() -> anyhow::Result<EngineConfig> {
    let config = match std::env::var_os(CONFIG_VAR) {
        Some(path) => EngineConfig::from_yaml_file(Path::new(&path))
            .with_context(|| format!("reading {CONFIG_VAR}={path:?}"))?,
        None => EngineConfig::default(),
    };
    config.validate()?;
    Ok(config)
}

fn uniform_perf(config: &EngineConfig) -> anyhow::Result<()> {
    const SAMPLE_SIZE: usize = 64;
    let mut rng = StdRng::seed_from_u64(42);

    for log_num_lines in (12..17).step_by(2) {
        let num_lines = 1 << log_num_lines;
        let lines = random_lines(&mut rng, config, num_lines, 80.);
        let grid = UniformGrid::from_segments(
            config.canvas_width,
            config.canvas_height,
            config.cell_size,
            lines.iter(),
        )?;
        eprintln!("Profiling with {} lines (cell size = {})", num_lines, config.cell_size);

        let engine = IntersectionEngine::new();
        let mut hits = 0;
        for i in 0..SAMPLE_SIZE {
            // A fresh pose every round keeps the footprint build in the
            // profile.
            let target = random_shape(&mut rng, config, 1, 80);
            let other = random_shape(&mut rng, config, 2, 80);
            let result = engine.intersect(&target, &other, &lines, config, Some(&grid))?;
            hits += result.total_hits();
            if i == 0 {
                eprintln!("{:#?}", result.timings);
            }
        }
        eprintln!("{} hits in {} queries", hits, SAMPLE_SIZE);
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let config = load_config()?;
    uniform_perf(&config)
}
