//! Read-only snapshot of the world for external consumers.
//!
//! A [`WorldSnapshot`] copies the current resource amounts and every living
//! trader out of a [`SimulationState`]. It never feeds back into the run.

use serde::Serialize;
use sugarscape_types::{ResourceKind, Trader};

use crate::tick::SimulationState;

/// Point-in-time copy of grid amounts and traders.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorldSnapshot {
    /// Completed steps at capture time.
    pub step: u64,
    /// Number of grid rows.
    pub width: u32,
    /// Number of grid columns.
    pub height: u32,
    /// Sugar amounts, indexed `[x][y]`.
    pub sugar: Vec<Vec<f64>>,
    /// Spice amounts, indexed `[x][y]`.
    pub spice: Vec<Vec<f64>>,
    /// Living traders in id order.
    pub traders: Vec<Trader>,
}

impl WorldSnapshot {
    /// Capture the current state.
    pub fn capture(state: &SimulationState) -> Self {
        Self {
            step: state.step,
            width: state.grid.width(),
            height: state.grid.height(),
            sugar: state.grid.amount_matrix(ResourceKind::Sugar),
            spice: state.grid.amount_matrix(ResourceKind::Spice),
            traders: state.traders.values().cloned().collect(),
        }
    }
}
