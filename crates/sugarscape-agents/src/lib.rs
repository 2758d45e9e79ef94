//! Trader behavior for the Sugarscape simulation.
//!
//! A trader forages: each turn it looks over the cells within its vision,
//! moves to the one that would leave it best off, harvests everything there,
//! burns its metabolism, and dies if either stock is exhausted.
//!
//! # Modules
//!
//! - [`activation`] -- One complete turn against the live grid.
//! - [`death`] -- Death conditions and the record left behind.
//! - [`decision`] -- Candidate evaluation and deterministic selection.
//! - [`error`] -- Error types for agent operations.
//! - [`metabolism`] -- Per-step consumption of sugar and spice.
//! - [`welfare`] -- Cobb-Douglas welfare of a sugar/spice bundle.

pub mod activation;
pub mod death;
pub mod decision;
pub mod error;
pub mod metabolism;
pub mod welfare;

// Re-export primary types at crate root.
pub use activation::{Activation, activate};
pub use death::{DeathCause, DeathConsequences, check_death};
pub use decision::{Candidate, candidates, choose_destination, select};
pub use error::AgentError;
pub use metabolism::{MetabolismResult, metabolize};
pub use welfare::WelfareWeights;
