//! Scheduling and orchestration for the Sugarscape simulation.
//!
//! This crate ties the world and the traders together: it loads the
//! configuration, bootstraps the initial state, and runs the per-step
//! scheduler.
//!
//! # Modules
//!
//! - [`bootstrap`] -- Initial state from configuration and landscape.
//! - [`config`] -- YAML configuration with defaults and validation.
//! - [`runner`] -- Fixed-length run loop with a per-step callback.
//! - [`snapshot`] -- Serializable copy of the world for external tools.
//! - [`tick`] -- One step: growback, shuffled activation, counter.

pub mod bootstrap;
pub mod config;
pub mod runner;
pub mod snapshot;
pub mod tick;

// Re-export primary types at crate root.
pub use bootstrap::{BootstrapError, bootstrap, bootstrap_from_config, create_rng};
pub use config::{ConfigError, SimulationConfig};
pub use runner::{
    NoOpCallback, RunnerError, SimulationResult, TickCallback, log_simulation_end, run_simulation,
};
pub use snapshot::WorldSnapshot;
pub use tick::{SimulationState, TickError, TickSummary, run_step};
