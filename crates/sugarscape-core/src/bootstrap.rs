//! Bootstrap: build the initial simulation state from configuration.
//!
//! 1. Validate the configuration and check the landscape shape.
//! 2. Create one full sugar and/or spice patch per cell with positive
//!    capacity, scanning row by row.
//! 3. Spawn `initial_population` traders on distinct random cells with
//!    attributes drawn uniformly from the configured inclusive ranges.
//!
//! Every random draw comes from one `ChaCha12Rng` seeded from
//! `world.seed`, which is then handed to the scheduler. Identical
//! configuration and landscape therefore yield identical runs.

use std::collections::BTreeMap;

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha12Rng;
use sugarscape_types::{IdSequence, NeighborhoodKind, Position, ResourceKind, Trader, TraderId};
use sugarscape_world::{Grid, Landscape, WorldError};
use tracing::info;

use crate::config::{ConfigError, PopulationConfig, SimulationConfig};
use crate::tick::SimulationState;

/// Errors that can occur while building the initial state.
#[derive(Debug, thiserror::Error)]
pub enum BootstrapError {
    /// The configuration is invalid.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: ConfigError,
    },

    /// The landscape or grid could not be built.
    #[error("world error: {source}")]
    World {
        /// The underlying world error.
        #[from]
        source: WorldError,
    },

    /// More traders were requested than there are cells to put them on.
    #[error("cannot place {population} traders on a grid of {cells} cells")]
    PopulationTooLarge {
        /// Requested population.
        population: u32,
        /// Cells available.
        cells: u64,
    },
}

/// Create the run's random number generator.
pub fn create_rng(seed: u64) -> ChaCha12Rng {
    ChaCha12Rng::seed_from_u64(seed)
}

/// Load the configured landscape file and build the initial state.
///
/// # Errors
///
/// Returns [`BootstrapError::World`] if the landscape cannot be read or
/// parsed, plus every error of [`bootstrap`].
pub fn bootstrap_from_config(config: &SimulationConfig) -> Result<SimulationState, BootstrapError> {
    config.validate()?;
    let landscape = Landscape::from_file(&config.world.landscape_path)?;
    bootstrap(config, &landscape)
}

/// Build the initial simulation state from a configuration and a landscape.
///
/// # Errors
///
/// Returns [`BootstrapError::Config`] for an invalid configuration,
/// [`BootstrapError::World`] if the landscape shape does not match the
/// configured grid, and [`BootstrapError::PopulationTooLarge`] if the
/// traders do not fit on distinct cells.
pub fn bootstrap(
    config: &SimulationConfig,
    landscape: &Landscape,
) -> Result<SimulationState, BootstrapError> {
    config.validate()?;
    landscape.ensure_shape(config.world.width, config.world.height)?;

    let mut ids = IdSequence::new();
    let mut grid = Grid::from_landscape(landscape, &mut ids)?;
    let mut rng = create_rng(config.world.seed);

    let traders = spawn_traders(
        &mut grid,
        &mut ids,
        &mut rng,
        &config.population,
        config.world.neighborhood,
    )?;

    info!(
        seed = config.world.seed,
        width = grid.width(),
        height = grid.height(),
        sugar_patches = grid.patch_count(ResourceKind::Sugar),
        spice_patches = grid.patch_count(ResourceKind::Spice),
        traders = traders.len(),
        neighborhood = %config.world.neighborhood,
        "Simulation bootstrapped"
    );

    Ok(SimulationState::new(grid, traders, rng))
}

/// Create the initial traders and place each on its own cell.
///
/// Cells are chosen by shuffling every cell of the grid and taking the
/// first `initial_population`. Per trader the draws are, in order: sugar
/// endowment, spice endowment, sugar metabolism, spice metabolism, vision.
/// Every draw is an integer; endowments are stored as whole-unit holdings.
///
/// # Errors
///
/// Returns [`BootstrapError::PopulationTooLarge`] if there are fewer cells
/// than traders, or [`BootstrapError::World`] if placement fails.
pub fn spawn_traders<R: Rng>(
    grid: &mut Grid,
    ids: &mut IdSequence,
    rng: &mut R,
    population: &PopulationConfig,
    neighborhood: NeighborhoodKind,
) -> Result<BTreeMap<TraderId, Trader>, BootstrapError> {
    let requested = population.initial_population;
    if u64::from(requested) > grid.cell_count() {
        return Err(BootstrapError::PopulationTooLarge {
            population: requested,
            cells: grid.cell_count(),
        });
    }

    let mut cells: Vec<Position> = grid.cells().collect();
    cells.shuffle(rng);

    let mut traders = BTreeMap::new();
    let requested_cells = usize::try_from(requested).unwrap_or(usize::MAX);
    for position in cells.into_iter().take(requested_cells) {
        let trader = Trader {
            id: ids.next_trader(),
            position,
            sugar: f64::from(rng.random_range(population.endowment_min..=population.endowment_max)),
            spice: f64::from(rng.random_range(population.endowment_min..=population.endowment_max)),
            metabolism_sugar: rng.random_range(population.metabolism_min..=population.metabolism_max),
            metabolism_spice: rng.random_range(population.metabolism_min..=population.metabolism_max),
            vision: rng.random_range(population.vision_min..=population.vision_max),
            neighborhood,
        };
        grid.place(trader.id, trader.position)?;
        traders.insert(trader.id, trader);
    }
    Ok(traders)
}
