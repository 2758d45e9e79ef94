//! Command-line runner for the Sugarscape simulation.
//!
//! Loads configuration, builds the initial world, runs the requested number
//! of steps, and optionally writes a JSON snapshot of the final world.
//!
//! # Startup Sequence
//!
//! 1. Parse command-line arguments
//! 2. Load configuration from `sugarscape-config.yaml` (or `--config`)
//! 3. Apply command-line overrides and validate
//! 4. Initialize structured logging (tracing)
//! 5. Load the landscape and bootstrap patches and traders
//! 6. Run the step loop
//! 7. Log the result and write the snapshot

mod error;

use std::path::{Path, PathBuf};

use clap::Parser;
use sugarscape_core::{
    NoOpCallback, SimulationConfig, WorldSnapshot, bootstrap, log_simulation_end, run_simulation,
};
use sugarscape_world::Landscape;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::error::EngineError;

/// Default configuration file, relative to the working directory.
const DEFAULT_CONFIG: &str = "sugarscape-config.yaml";

#[derive(Debug, Parser)]
#[command(name = "sugarscape-engine")]
#[command(version)]
#[command(about = "Sugarscape growback simulation with foraging traders")]
struct Cli {
    /// Configuration file (YAML)
    #[arg(short, long, default_value = DEFAULT_CONFIG)]
    config: PathBuf,

    /// Number of steps to simulate (overrides the config file)
    #[arg(short, long)]
    steps: Option<u64>,

    /// Random seed for reproducibility (overrides the config file)
    #[arg(long)]
    seed: Option<u64>,

    /// Sugar landscape file (overrides the config file)
    #[arg(short, long)]
    landscape: Option<PathBuf>,

    /// Write a JSON snapshot of the final world to this path
    #[arg(long)]
    snapshot: Option<PathBuf>,

    /// Emit logs as JSON lines
    #[arg(long)]
    json_logs: bool,
}

/// Application entry point.
///
/// # Errors
///
/// Returns an error if any initialization step or the simulation itself fails.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = load_config(&cli)?;
    init_logging(&config.logging.level, cli.json_logs);

    info!(
        config = %cli.config.display(),
        seed = config.world.seed,
        width = config.world.width,
        height = config.world.height,
        landscape = %config.world.landscape_path.display(),
        initial_population = config.population.initial_population,
        steps = config.simulation.steps,
        "Configuration loaded"
    );

    let landscape = Landscape::from_file(&config.world.landscape_path).map_err(EngineError::from)?;
    let mut state = bootstrap(&config, &landscape).map_err(EngineError::from)?;

    let result = run_simulation(
        &mut state,
        config.simulation.steps,
        config.simulation.summary_interval,
        &mut NoOpCallback,
    )
    .map_err(EngineError::from)?;
    log_simulation_end(&result);

    if let Some(path) = &cli.snapshot {
        write_snapshot(path, &WorldSnapshot::capture(&state))?;
        info!(path = %path.display(), step = state.step, "Snapshot written");
    }

    info!(
        total_steps = result.total_steps,
        traders_alive = state.traders_alive(),
        "sugarscape-engine finished"
    );
    Ok(())
}

/// Load configuration and apply command-line overrides.
///
/// A missing default config file falls back to built-in defaults; a
/// missing file named explicitly with `--config` is an error.
fn load_config(cli: &Cli) -> Result<SimulationConfig, EngineError> {
    let mut config = if cli.config.exists() || cli.config != Path::new(DEFAULT_CONFIG) {
        SimulationConfig::from_file(&cli.config)?
    } else {
        let mut config = SimulationConfig::default();
        config.world.apply_env_overrides();
        config
    };

    if let Some(steps) = cli.steps {
        config.simulation.steps = steps;
    }
    if let Some(seed) = cli.seed {
        config.world.seed = seed;
    }
    if let Some(landscape) = &cli.landscape {
        config.world.landscape_path.clone_from(landscape);
    }

    config.validate()?;
    Ok(config)
}

/// Initialize the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over the configured level.
fn init_logging(level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

/// Serialize a snapshot as pretty-printed JSON and write it to `path`.
fn write_snapshot(path: &Path, snapshot: &WorldSnapshot) -> Result<(), EngineError> {
    let json = serde_json::to_string_pretty(snapshot)?;
    std::fs::write(path, json).map_err(|source| EngineError::SnapshotWrite {
        path: path.to_path_buf(),
        source,
    })
}
