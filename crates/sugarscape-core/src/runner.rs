//! Simulation loop runner.
//!
//! [`run_simulation`] drives [`run_step`] a fixed number of times. There
//! is no early stop: a run that loses every trader keeps stepping, and the
//! patches keep growing back.
//!
//! [`run_step`]: crate::tick::run_step

use tracing::{info, warn};

use crate::tick::{self, SimulationState, TickError, TickSummary};

/// Errors that can occur during the simulation run.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// A step execution failed.
    #[error("tick error: {source}")]
    Tick {
        /// The underlying tick error.
        #[from]
        source: TickError,
    },
}

/// Result of the simulation run.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationResult {
    /// The last step summary, if any step ran.
    pub final_summary: Option<TickSummary>,
    /// Total number of steps executed by this run.
    pub total_steps: u64,
    /// Total deaths across the run.
    pub total_deaths: u64,
}

/// Callback invoked after each step completes.
///
/// The callback receives the step summary and the current simulation
/// state.
pub trait TickCallback {
    /// Called after a step completes successfully.
    fn on_tick(&mut self, summary: &TickSummary, state: &SimulationState);
}

/// A no-op tick callback.
pub struct NoOpCallback;

impl TickCallback for NoOpCallback {
    fn on_tick(&mut self, _summary: &TickSummary, _state: &SimulationState) {}
}

/// Run `steps` steps of the simulation.
///
/// Every `summary_interval` steps a progress line is logged at `info`;
/// zero disables it.
///
/// # Errors
///
/// Returns [`RunnerError`] if a step fails. Steps completed before the
/// failure remain applied to `state`.
pub fn run_simulation(
    state: &mut SimulationState,
    steps: u64,
    summary_interval: u64,
    callback: &mut dyn TickCallback,
) -> Result<SimulationResult, RunnerError> {
    let mut last_summary: Option<TickSummary> = None;
    let mut total_steps: u64 = 0;
    let mut total_deaths: u64 = 0;

    info!(
        steps,
        start_step = state.step,
        traders_alive = state.traders_alive(),
        "Simulation starting"
    );

    for _ in 0..steps {
        let summary = tick::run_step(state)?;
        total_steps = total_steps.saturating_add(1);
        let step_deaths = u64::try_from(summary.deaths.len()).unwrap_or(u64::MAX);
        total_deaths = total_deaths.saturating_add(step_deaths);

        callback.on_tick(&summary, state);

        // An interval of zero disables the periodic summary.
        if summary.step.checked_rem(summary_interval) == Some(0) {
            info!(
                step = summary.step,
                traders_alive = summary.traders_alive,
                deaths = summary.deaths.len(),
                moves = summary.moves,
                "Step summary"
            );
        }

        last_summary = Some(summary);
    }

    Ok(SimulationResult {
        final_summary: last_summary,
        total_steps,
        total_deaths,
    })
}

/// Log the end of a run.
pub fn log_simulation_end(result: &SimulationResult) {
    info!(
        total_steps = result.total_steps,
        total_deaths = result.total_deaths,
        final_step = result.final_summary.as_ref().map(|s| s.step),
        final_traders_alive = result.final_summary.as_ref().map(|s| s.traders_alive),
        "Simulation ended"
    );

    if result.final_summary.is_none() {
        warn!("Simulation ended with no steps executed");
    }
}
